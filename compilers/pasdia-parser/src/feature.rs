use nom::{
    bytes::complete::{take_till, take_while, take_while1},
    character::complete::char,
    sequence::{delimited, separated_pair},
    IResult,
};
use pasdia_protocol::{ArgumentId, CaseRole, RoleFlags, RoleLink, RoleSet};

const ID_KEY: &str = "ID";
const TYPE_KEY: &str = "type";
const PREDICATE_TYPE: &str = "pred";

/// Annotations recognized on one morpheme record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureRecord {
    /// `ID="n"`: the segment can be referenced as an argument.
    pub id: Option<ArgumentId>,
    /// `type="pred"`
    pub is_predicate: bool,
    /// `ga|o|ni="n"`, always in `ga, o, ni` order.
    pub roles: RoleSet,
}

impl FeatureRecord {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && !self.is_predicate && self.roles.is_empty()
    }
}

/// The feature part of a morpheme record: everything after the first tab,
/// or the whole record when it has no tab.
pub fn payload(record: &str) -> &str {
    record.split_once('\t').map_or(record, |(_, features)| features)
}

fn is_delimiter(c: char) -> bool {
    matches!(c, ',' | ' ' | '\t')
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `key="value"`
fn attribute(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(
        take_while1(is_key_char),
        char('='),
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
    )(input)
}

/// Every `key="value"` attribute that starts at a token boundary, in input order.
pub fn attributes(payload: &str) -> Vec<(&str, &str)> {
    let mut input = payload;
    let mut result = Vec::new();

    loop {
        // 1. Skip delimiters
        let (next_input, _) = match take_while::<_, &str, nom::error::Error<&str>>(is_delimiter)(input) {
            Ok(res) => res,
            Err(_) => break,
        };
        input = next_input;

        if input.is_empty() {
            break;
        }

        // 2. Try an attribute, otherwise skip the rest of this token
        match attribute(input) {
            Ok((next_input, pair)) => {
                result.push(pair);
                input = next_input;
            }
            Err(_) => match take_till::<_, &str, nom::error::Error<&str>>(is_delimiter)(input) {
                Ok((next_input, skipped)) if !skipped.is_empty() => input = next_input,
                _ => break,
            },
        }
    }

    result
}

/// Parse the fixed tag vocabulary out of a feature payload.
///
/// Unknown keys are ignored, as are non-numeric ids. When a key repeats the
/// first occurrence wins.
pub fn parse_features(payload: &str) -> FeatureRecord {
    let mut record = FeatureRecord::default();
    let mut seen = RoleFlags::empty();
    let mut links = Vec::new();

    for (key, value) in attributes(payload) {
        match key {
            ID_KEY => {
                if record.id.is_none() {
                    record.id = value.parse::<u32>().ok().map(ArgumentId);
                }
            }
            TYPE_KEY => {
                if value == PREDICATE_TYPE {
                    record.is_predicate = true;
                }
            }
            _ => {
                let Some(role) = CaseRole::from_key(key) else {
                    continue;
                };
                if seen.contains(role.flag()) {
                    continue;
                }
                if let Ok(id) = value.parse::<u32>() {
                    seen |= role.flag();
                    links.push(RoleLink::new(role, ArgumentId(id)));
                }
            }
        }
    }

    links.sort_by_key(|l| l.role);
    record.roles = links.into_iter().collect();
    record
}
