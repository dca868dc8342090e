/// Identity of one of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    First,
    Second,
}

impl PlayerId {
    /// Get the other player
    pub fn other(self) -> PlayerId {
        match self {
            PlayerId::First => PlayerId::Second,
            PlayerId::Second => PlayerId::First,
        }
    }

    /// Seat number for display, 1 or 2
    pub fn number(self) -> u8 {
        match self {
            PlayerId::First => 1,
            PlayerId::Second => 2,
        }
    }
}

/// A player identity plus the colour the front end draws its pieces in.
///
/// The colour plays no part in the rules beyond the construction check that
/// the two players are distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub color: String,
}

impl Player {
    pub fn new(id: PlayerId, color: impl Into<String>) -> Self {
        Player {
            id,
            color: color.into(),
        }
    }

    /// Whether two players would be drawn in the same colour.
    /// Surrounding whitespace and ASCII case are ignored.
    pub fn same_color_ignoring_case(&self, other: &Player) -> bool {
        self.color.trim().eq_ignore_ascii_case(other.color.trim())
    }
}
