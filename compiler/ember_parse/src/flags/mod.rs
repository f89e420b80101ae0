//! Parse flags for context-sensitive rules.
//!
//! Flags resolve local ambiguities (an object literal cannot start an `if`
//! condition, where `{` opens the then-block) and record where a statement
//! sits (`break` is only meaningful inside a loop). They are part of every
//! memo key, so a rule reused from the memo was parsed under the same
//! context.

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ParseFlags: u8 {
        /// `{` does not start an object literal.
        const NO_OBJECT_LITERAL = 1 << 0;
        /// Inside a `while` body.
        const IN_LOOP = 1 << 1;
        /// Inside a handler or function body.
        const IN_FUNCTION = 1 << 2;
    }
}

impl ParseFlags {
    #[inline]
    pub const fn allows_object_literal(self) -> bool {
        !self.contains(Self::NO_OBJECT_LITERAL)
    }

    #[inline]
    pub const fn in_loop(self) -> bool {
        self.contains(Self::IN_LOOP)
    }

    #[inline]
    pub const fn in_function(self) -> bool {
        self.contains(Self::IN_FUNCTION)
    }

    /// Flags for a nested scope: `add` set and `remove` cleared.
    #[inline]
    #[must_use]
    pub const fn scoped(self, add: Self, remove: Self) -> Self {
        self.union(add).difference(remove)
    }
}

#[cfg(test)]
mod tests;
