use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Table;

/// Semantic category of a column, inferred from its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Email,
    Phone,
    Name,
    Company,
    Country,
    SequenceNumber,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Email,
        Role::Phone,
        Role::Name,
        Role::Company,
        Role::Country,
        Role::SequenceNumber,
    ];

    /// Roles that drive a cell rewrite, highest priority first.
    pub const NORMALIZATION_PRIORITY: [Role; 5] = [
        Role::Company,
        Role::Country,
        Role::Name,
        Role::Email,
        Role::Phone,
    ];

    /// Roles holding personal information, highest masking priority first.
    pub const MASKING_PRIORITY: [Role; 3] = [Role::Name, Role::Phone, Role::Email];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Role::Email => EMAIL_KEYWORDS,
            Role::Phone => PHONE_KEYWORDS,
            Role::Name => NAME_KEYWORDS,
            Role::Company => COMPANY_KEYWORDS,
            Role::Country => COUNTRY_KEYWORDS,
            Role::SequenceNumber => SEQUENCE_KEYWORDS,
        }
    }

    /// Whether `header` (already lowercased and trimmed) matches this role.
    fn matches(self, header: &str) -> bool {
        match self {
            // "no" as a substring would capture "Notes" and "Phone No".
            Role::SequenceNumber => SEQUENCE_KEYWORDS.contains(&header),
            _ => self.keywords().iter().any(|kw| header.contains(kw)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Email => write!(f, "email"),
            Role::Phone => write!(f, "phone"),
            Role::Name => write!(f, "name"),
            Role::Company => write!(f, "company"),
            Role::Country => write!(f, "country"),
            Role::SequenceNumber => write!(f, "sequence"),
        }
    }
}

const EMAIL_KEYWORDS: &[&str] = &["이메일", "email", "e-mail", "mail"];
const PHONE_KEYWORDS: &[&str] = &[
    "전화", "phone", "tel", "mobile", "휴대폰", "연락처", "contact",
];
const NAME_KEYWORDS: &[&str] = &[
    "이름",
    "성명",
    "name",
    "first name",
    "last name",
    "참가자",
    "full name",
    "representative",
    "대표자",
];
const COMPANY_KEYWORDS: &[&str] = &[
    "회사",
    "소속",
    "company",
    "organization",
    "org",
    "firm",
    "agency",
    "부스",
    "booth",
    "업체",
];
const COUNTRY_KEYWORDS: &[&str] = &["국가", "나라", "country", "nation", "nationality", "region"];
const SEQUENCE_KEYWORDS: &[&str] = &["no", "no.", "연번", "순번", "번호", "nr", "num"];

/// A set of roles, stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleSet(u8);

impl RoleSet {
    pub fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn insert(&mut self, role: Role) {
        self.0 |= role.bit();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Role> {
        Role::ALL.into_iter().filter(move |r| self.contains(*r))
    }

    /// The role whose rewrite rule applies to this column, if any.
    pub fn normalization_role(self) -> Option<Role> {
        Role::NORMALIZATION_PRIORITY
            .into_iter()
            .find(|r| self.contains(*r))
    }

    /// The personal-info role whose mask applies to this column, if any.
    pub fn masking_role(self) -> Option<Role> {
        Role::MASKING_PRIORITY.into_iter().find(|r| self.contains(*r))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = RoleSet::default();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl Serialize for RoleSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Tag a header with every role whose keyword set matches.
pub fn classify_header(header: &str) -> RoleSet {
    let lower = header.trim().to_lowercase();
    if lower.is_empty() {
        return RoleSet::default();
    }
    Role::ALL.into_iter().filter(|r| r.matches(&lower)).collect()
}

/// Role sets for every column of one table, fixed at classification time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    roles: Vec<RoleSet>,
}

impl ColumnRoles {
    pub fn classify(table: &Table) -> Self {
        ColumnRoles {
            roles: table.columns.iter().map(|h| classify_header(h)).collect(),
        }
    }

    pub fn get(&self, idx: usize) -> RoleSet {
        self.roles.get(idx).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Indices of every column carrying `role`, in column order.
    pub fn columns_with(&self, role: Role) -> Vec<usize> {
        self.roles
            .iter()
            .enumerate()
            .filter(|(_, set)| set.contains(role))
            .map(|(i, _)| i)
            .collect()
    }

    /// The leftmost column carrying `role`.
    pub fn first_with(&self, role: Role) -> Option<usize> {
        self.roles.iter().position(|set| set.contains(role))
    }
}

/// Per-column classification, for display.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnReport {
    pub header: String,
    pub roles: RoleSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_as: Option<Role>,
}

pub fn describe_columns(table: &Table) -> Vec<ColumnReport> {
    let roles = ColumnRoles::classify(table);
    table
        .columns
        .iter()
        .enumerate()
        .map(|(i, header)| ColumnReport {
            header: header.clone(),
            roles: roles.get(i),
            normalized_as: roles.get(i).normalization_role(),
        })
        .collect()
}
