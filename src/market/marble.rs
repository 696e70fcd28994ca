//! Marble colours and what they yield.

use serde::{Deserialize, Serialize};

use crate::resources::ResourceType;

/// Colour of a market marble.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marble {
    White,
    Blue,
    Grey,
    Yellow,
    Purple,
    Red,
}

/// What a drawn marble turns into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarbleYield {
    /// A concrete resource for the buffer.
    Resource(ResourceType),
    /// A wildcard resolved only through active marble effects.
    White,
    /// One faith step, no resource.
    Faith,
}

impl Marble {
    #[must_use]
    pub const fn yields(self) -> MarbleYield {
        match self {
            Marble::White => MarbleYield::White,
            Marble::Blue => MarbleYield::Resource(ResourceType::Shield),
            Marble::Grey => MarbleYield::Resource(ResourceType::Stone),
            Marble::Yellow => MarbleYield::Resource(ResourceType::Coin),
            Marble::Purple => MarbleYield::Resource(ResourceType::Servant),
            Marble::Red => MarbleYield::Faith,
        }
    }
}

impl std::fmt::Display for Marble {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Marble::White => "white",
            Marble::Blue => "blue",
            Marble::Grey => "grey",
            Marble::Yellow => "yellow",
            Marble::Purple => "purple",
            Marble::Red => "red",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colour_mapping() {
        assert_eq!(Marble::Blue.yields(), MarbleYield::Resource(ResourceType::Shield));
        assert_eq!(Marble::Grey.yields(), MarbleYield::Resource(ResourceType::Stone));
        assert_eq!(Marble::Yellow.yields(), MarbleYield::Resource(ResourceType::Coin));
        assert_eq!(Marble::Purple.yields(), MarbleYield::Resource(ResourceType::Servant));
        assert_eq!(Marble::White.yields(), MarbleYield::White);
        assert_eq!(Marble::Red.yields(), MarbleYield::Faith);
    }
}
