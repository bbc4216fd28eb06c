/// Expected response status for a step.
///
/// Serialized untagged: a bare number (`expect: 201`), a list of numbers
/// (`expect: [200, 204]`), or a class string (`expect: "2xx"`).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum StatusExpectation {
    Code(u16),
    AnyOf(Vec<u16>),
    Class(String),
}

impl StatusExpectation {
    pub fn matches(&self, status: u16) -> bool {
        match self {
            StatusExpectation::Code(c) => status == *c,
            StatusExpectation::AnyOf(codes) => codes.contains(&status),
            StatusExpectation::Class(class) => match class_range(class) {
                Some((lo, hi)) => (lo..hi).contains(&status),
                None => false,
            },
        }
    }

    pub fn describe(&self) -> String {
        match self {
            StatusExpectation::Code(c) => c.to_string(),
            StatusExpectation::AnyOf(codes) => format!("{codes:?}"),
            StatusExpectation::Class(class) => class.clone(),
        }
    }
}

/// Default expectation when a step declares none: any 2xx.
pub(crate) fn default_matches(status: u16) -> bool {
    (200..300).contains(&status)
}

pub(crate) fn class_range(class: &str) -> Option<(u16, u16)> {
    let digit = class.strip_suffix("xx")?;
    match digit {
        "1" => Some((100, 200)),
        "2" => Some((200, 300)),
        "3" => Some((300, 400)),
        "4" => Some((400, 500)),
        "5" => Some((500, 600)),
        _ => None,
    }
}

pub fn status_matches(expect: Option<&StatusExpectation>, status: u16) -> bool {
    match expect {
        Some(e) => e.matches(status),
        None => default_matches(status),
    }
}
