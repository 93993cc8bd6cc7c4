//! Bidirectional read-only cursor over a hash table

use std::cmp::Ordering;
use std::fmt;

use super::HashTable;
use super::error::{HashtableError, HashtableResult};
use crate::infrastructure::hash::SipHashProvider;
use crate::types::Position;

/// Iteration direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}

// Declaration order gives BeforeFirst < At(_) < AfterLast
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum CursorPosition {
    BeforeFirst,
    At(Position),
    AfterLast,
}

/// Position-based cursor over a table's entries, in insertion order
///
/// Besides entries, a cursor can rest on two end sentinels: before the first
/// entry and after the last one. Stepping past a sentinel fails and leaves
/// the cursor where it was.
pub struct Cursor<'a, K, V, H = SipHashProvider> {
    table: &'a HashTable<K, V, H>,
    position: CursorPosition,
}

impl<'a, K, V, H> Cursor<'a, K, V, H> {
    /// Open a cursor at `position`
    ///
    /// Fails when `position` is not below the table's capacity. When no entry
    /// lives at `position` the cursor moves forward to the next one, or to
    /// the forward end.
    pub fn new(table: &'a HashTable<K, V, H>, position: Position) -> HashtableResult<Self> {
        if position >= table.capacity() {
            return Err(HashtableError::InvalidPosition {
                position,
                capacity: table.capacity(),
            });
        }
        Ok(Cursor {
            table,
            position: Self::forward_from(table, position),
        })
    }

    pub(crate) fn at_position(table: &'a HashTable<K, V, H>, position: Position) -> Self {
        Cursor {
            table,
            position: CursorPosition::At(position),
        }
    }

    pub fn first(table: &'a HashTable<K, V, H>) -> Self {
        Cursor {
            table,
            position: Self::forward_from(table, 0),
        }
    }

    pub fn last(table: &'a HashTable<K, V, H>) -> Self {
        let mut cursor = Cursor {
            table,
            position: CursorPosition::AfterLast,
        };
        cursor.move_last();
        cursor
    }

    fn forward_from(table: &HashTable<K, V, H>, position: Position) -> CursorPosition {
        table
            .next_position(position)
            .map_or(CursorPosition::AfterLast, CursorPosition::At)
    }

    fn backward_from(table: &HashTable<K, V, H>, before: Position) -> CursorPosition {
        table
            .prev_position(before)
            .map_or(CursorPosition::BeforeFirst, CursorPosition::At)
    }

    /// Move to the first entry; to the forward end when the table is empty
    pub fn move_first(&mut self) {
        self.position = Self::forward_from(self.table, 0);
    }

    /// Move to the last entry; to the forward end when the table is empty
    pub fn move_last(&mut self) {
        self.position = match self.table.prev_position(self.table.end_position()) {
            Some(position) => CursorPosition::At(position),
            None => CursorPosition::AfterLast,
        };
    }

    pub fn move_next(&mut self) -> HashtableResult<()> {
        self.position = match self.position {
            CursorPosition::BeforeFirst => Self::forward_from(self.table, 0),
            CursorPosition::At(position) => Self::forward_from(self.table, position + 1),
            CursorPosition::AfterLast => {
                return Err(HashtableError::CursorAtEnd(Direction::Forward));
            }
        };
        Ok(())
    }

    pub fn move_prev(&mut self) -> HashtableResult<()> {
        self.position = match self.position {
            CursorPosition::BeforeFirst => {
                return Err(HashtableError::CursorAtEnd(Direction::Backward));
            }
            CursorPosition::At(position) => Self::backward_from(self.table, position),
            CursorPosition::AfterLast => {
                Self::backward_from(self.table, self.table.end_position())
            }
        };
        Ok(())
    }

    /// True on a live entry or on either end sentinel
    pub fn is_valid(&self) -> bool {
        match self.position {
            CursorPosition::At(position) => self.table.key_value_at(position).is_some(),
            CursorPosition::BeforeFirst | CursorPosition::AfterLast => true,
        }
    }

    /// True on either end sentinel
    pub fn is_end(&self) -> bool {
        !matches!(self.position, CursorPosition::At(_))
    }

    /// True on the sentinel reached by moving in `direction`
    pub fn is_end_in(&self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.position == CursorPosition::AfterLast,
            Direction::Backward => self.position == CursorPosition::BeforeFirst,
        }
    }

    /// Entry position, `None` on a sentinel
    pub fn position(&self) -> Option<Position> {
        match self.position {
            CursorPosition::At(position) => Some(position),
            _ => None,
        }
    }

    pub fn entry(&self) -> HashtableResult<(&'a K, &'a V)> {
        match self.position {
            CursorPosition::At(position) => {
                self.table
                    .key_value_at(position)
                    .ok_or(HashtableError::InvalidPosition {
                        position,
                        capacity: self.table.capacity(),
                    })
            }
            CursorPosition::BeforeFirst => Err(HashtableError::CursorAtEnd(Direction::Backward)),
            CursorPosition::AfterLast => Err(HashtableError::CursorAtEnd(Direction::Forward)),
        }
    }

    pub fn key(&self) -> HashtableResult<&'a K> {
        self.entry().map(|(key, _)| key)
    }

    pub fn value(&self) -> HashtableResult<&'a V> {
        self.entry().map(|(_, value)| value)
    }

    pub fn table(&self) -> &'a HashTable<K, V, H> {
        self.table
    }

    pub fn same_table(&self, other: &Self) -> bool {
        std::ptr::eq(self.table, other.table)
    }

    /// Compare positions, failing when the cursors belong to different tables
    pub fn try_cmp(&self, other: &Self) -> HashtableResult<Ordering> {
        if !self.same_table(other) {
            return Err(HashtableError::ForeignCursor);
        }
        Ok(self.position.cmp(&other.position))
    }
}

impl<K, V, H> Clone for Cursor<'_, K, V, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, H> Copy for Cursor<'_, K, V, H> {}

impl<K, V, H> PartialEq for Cursor<'_, K, V, H> {
    fn eq(&self, other: &Self) -> bool {
        self.same_table(other) && self.position == other.position
    }
}

impl<K, V, H> PartialOrd for Cursor<'_, K, V, H> {
    /// `None` for cursors on different tables
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl<K, V, H> fmt::Debug for Cursor<'_, K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .finish()
    }
}
