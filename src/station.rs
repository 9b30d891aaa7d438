use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A city of the board.
///
/// Stations of a board are identified by dense ids starting at zero, which makes them usable
/// as indices, e.g. in a [`crate::partition::StationPartition`].
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Station {
    id: u8,
    name: Cow<'static, str>,
}

impl Station {
    /// # Example
    /// ```
    /// use rail_network::station::Station;
    ///
    /// const LAUSANNE: Station = Station::new(0, "Lausanne");
    /// assert_eq!(LAUSANNE.id(), 0);
    /// assert_eq!(LAUSANNE.to_string(), "Lausanne");
    /// ```
    pub const fn new(id: u8, name: &'static str) -> Self {
        Self {
            id,
            name: Cow::Borrowed(name),
        }
    }

    /// Same as `new`, for names only known at runtime.
    pub fn named(id: u8, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Cow::Owned(name.into()),
        }
    }

    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
