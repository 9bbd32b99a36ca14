/// Policy deciding which track follows the current one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlayMode {
    /// Advance and wrap around; behaves exactly like `LoopAll`.
    Sequential,
    /// Repeat the current track when it ends.
    #[default]
    LoopOne,
    /// Advance and wrap around to the first track.
    LoopAll,
    /// Pick any track uniformly, the current one included.
    Random,
}

impl PlayMode {
    /// Decode the persisted integer form.
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(Self::Sequential),
            1 => Some(Self::LoopOne),
            2 => Some(Self::LoopAll),
            3 => Some(Self::Random),
            _ => None,
        }
    }

    /// Like [`from_raw`](Self::from_raw) but coerces unknown values to the default.
    pub fn from_raw_or_default(raw: i64) -> Self {
        Self::from_raw(raw).unwrap_or_default()
    }

    pub fn as_raw(self) -> i64 {
        match self {
            Self::Sequential => 0,
            Self::LoopOne => 1,
            Self::LoopAll => 2,
            Self::Random => 3,
        }
    }

    /// Cycle `LoopOne -> LoopAll -> Random -> LoopOne`. `Sequential` is not
    /// part of the cycle and moves to `LoopOne`.
    pub fn cycled(self) -> Self {
        match self {
            Self::LoopOne => Self::LoopAll,
            Self::LoopAll => Self::Random,
            Self::Random | Self::Sequential => Self::LoopOne,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sequential => "Sequential",
            Self::LoopOne => "Repeat-one",
            Self::LoopAll => "Loop-all",
            Self::Random => "Random",
        }
    }
}
