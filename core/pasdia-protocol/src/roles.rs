use alloc::vec::Vec;
use core::fmt;

use bitflags::bitflags;

use crate::ids::ArgumentId;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Case roles carried by predicate annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum CaseRole {
    /// が, nominative
    Ga = 0,
    /// を, accusative
    O = 1,
    /// に, dative
    Ni = 2,
}

impl CaseRole {
    /// Fixed emission order for role tokens and role edges.
    pub const ALL: [CaseRole; 3] = [CaseRole::Ga, CaseRole::O, CaseRole::Ni];

    /// Attribute key in the feature payload.
    pub const fn key(self) -> &'static str {
        match self {
            CaseRole::Ga => "ga",
            CaseRole::O => "o",
            CaseRole::Ni => "ni",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        CaseRole::ALL.into_iter().find(|r| r.key() == key)
    }

    /// Edge label drawn under the connector.
    pub const fn label(self) -> &'static str {
        match self {
            CaseRole::Ga => "NOM",
            CaseRole::O => "ACC",
            CaseRole::Ni => "DAT",
        }
    }

    /// TikZ style of the connector.
    pub const fn edge_style(self) -> &'static str {
        match self {
            CaseRole::Ga => "red",
            CaseRole::O => "cyan, dashed",
            CaseRole::Ni => "teal",
        }
    }

    pub const fn flag(self) -> RoleFlags {
        match self {
            CaseRole::Ga => RoleFlags::GA,
            CaseRole::O => RoleFlags::O,
            CaseRole::Ni => RoleFlags::NI,
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct RoleFlags: u8 {
        const GA = 1;
        const O = 2;
        const NI = 4;
    }
}

/// One `<role>=<argument-id>` token on a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct RoleLink {
    pub role: CaseRole,
    pub argument: ArgumentId,
}

impl RoleLink {
    pub const fn new(role: CaseRole, argument: ArgumentId) -> Self {
        Self { role, argument }
    }
}

impl fmt::Display for RoleLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.role.key(), self.argument)
    }
}

/// The role tokens of one predicate, in `ga, o, ni` order. Displays as `ga=1 o=2`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RoleSet {
    links: Vec<RoleLink>,
}

impl RoleSet {
    pub fn new() -> Self {
        Self { links: Vec::new() }
    }

    pub fn push(&mut self, link: RoleLink) {
        self.links.push(link);
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, RoleLink> {
        self.links.iter()
    }

    /// Tokens of a single role, in stored order.
    pub fn for_role(&self, role: CaseRole) -> impl Iterator<Item = &RoleLink> {
        self.links.iter().filter(move |l| l.role == role)
    }

    pub fn flags(&self) -> RoleFlags {
        self.links
            .iter()
            .fold(RoleFlags::empty(), |acc, l| acc | l.role.flag())
    }
}

impl FromIterator<RoleLink> for RoleSet {
    fn from_iter<T: IntoIterator<Item = RoleLink>>(iter: T) -> Self {
        Self {
            links: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, link) in self.links.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", link)?;
        }
        Ok(())
    }
}
