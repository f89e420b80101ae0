//! Flat text edits mapped onto token mutations.

use super::{MutationResult, TokenStream};

/// Error for an edit that cannot be applied to the current text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("edit range {start}..{end} is outside the source (length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("offset {0} is not on a character boundary")]
    NotCharBoundary(usize),
    #[error("edited source would be {0} bytes, more than a u32 offset can address")]
    TooLarge(usize),
}

impl TokenStream {
    /// Replace `removed_len` bytes at `byte_pos` with `inserted`.
    ///
    /// The edit is widened to whole tokens and, backwards, to the nearest
    /// preceding whitespace or newline token, so a token that could merge
    /// with the edited text (`1.` followed by an inserted `5`) is scanned
    /// again.
    pub fn edit(
        &mut self,
        byte_pos: usize,
        removed_len: usize,
        inserted: &str,
    ) -> Result<MutationResult, EditError> {
        let len = self.source.len();
        let end = byte_pos.saturating_add(removed_len);
        if end > len {
            return Err(EditError::OutOfBounds {
                start: byte_pos,
                end,
                len,
            });
        }
        for offset in [byte_pos, end] {
            if !self.source.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary(offset));
            }
        }
        let new_len = len - removed_len + inserted.len();
        if u32::try_from(new_len).is_err() {
            return Err(EditError::TooLarge(new_len));
        }

        self.read_rest_muted();
        if self.tokens.is_empty() {
            return Ok(self.mutate(0, 0, inserted));
        }

        let tokens = &self.tokens;
        let containing = tokens
            .partition_point(|t| t.start() as usize <= byte_pos)
            .saturating_sub(1);
        let mut first = containing;
        while first > 0 && !tokens[first - 1].kind().is_layout() {
            first -= 1;
        }
        first = first.saturating_sub(1);

        let stop = tokens
            .partition_point(|t| (t.start() as usize) < end)
            .max(first);
        let num = stop - first;

        let region_start = tokens[first].start() as usize;
        let region_end = match num {
            0 => region_start,
            _ => tokens[stop - 1].end() as usize,
        };
        let mut insert = String::with_capacity(region_end - region_start + inserted.len());
        insert.push_str(&self.source[region_start..byte_pos]);
        insert.push_str(inserted);
        insert.push_str(&self.source[end..region_end]);

        Ok(self.mutate(first, num, &insert))
    }
}
