//! Front-end locations and the links between them.

use uspy_client::Url;
use uspy_model::SubjectKey;

use crate::messages;

pub const SUBJECTS_PATH: &str = "/subjects";
pub const LOGIN_PATH: &str = "/login";

/// Query parameter carrying the location to return to after login
pub const FROM_PARAM: &str = "from";

// Only used to borrow `Url`'s path and query encoding.
const ORIGIN: &str = "http://uspy.local";

/// `/subjects/{course}/{specialization}/{code}`
pub fn subject_path(key: &SubjectKey) -> String {
    let Ok(mut url) = Url::parse(ORIGIN) else {
        return format!("{SUBJECTS_PATH}/{key}");
    };

    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push("subjects").extend(key.segments());
    }

    url.path().to_string()
}

/// Inverse of [`subject_path`]; `None` for any other location
pub fn parse_subject_path(path: &str) -> Option<SubjectKey> {
    let url = Url::parse(ORIGIN).ok()?.join(path).ok()?;
    let mut segments = url.path_segments()?;

    if segments.next()? != "subjects" {
        return None;
    }

    let mut decoded = segments.map(decode_segment);
    let (course, specialization, code) = (decoded.next()??, decoded.next()??, decoded.next()??);
    if decoded.next().is_some() || [&course, &specialization, &code].iter().any(|s| s.is_empty()) {
        return None;
    }

    Some(SubjectKey::new(course, specialization, code))
}

fn decode_segment(segment: &str) -> Option<String> {
    // Round-trip through a query pair to reuse the form decoder. Path
    // encoding leaves `+` and `&` alone, the form decoder does not.
    let escaped = segment.replace('+', "%2B").replace('&', "%26");
    let url = Url::parse(&format!("{ORIGIN}/?s={escaped}")).ok()?;
    url.query_pairs()
        .find(|(name, _)| name == "s")
        .map(|(_, value)| value.into_owned())
}

/// Navigation to the login page that remembers where the user came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    from: String,
}

impl LoginRedirect {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }

    /// Redirect back to a subject page
    pub fn to_subject(key: &SubjectKey) -> Self {
        Self::new(subject_path(key))
    }

    /// Location to return to once logged in
    pub fn from(&self) -> &str {
        &self.from
    }

    /// `/login?from=<encoded location>`
    pub fn href(&self) -> String {
        let Ok(mut url) = Url::parse(ORIGIN) else {
            return LOGIN_PATH.to_string();
        };
        url.set_path(LOGIN_PATH);
        url.query_pairs_mut().append_pair(FROM_PARAM, &self.from);

        match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        }
    }

    /// Read the origin back from a login href
    pub fn parse(href: &str) -> Option<Self> {
        let url = Url::parse(ORIGIN).ok()?.join(href).ok()?;
        if url.path() != LOGIN_PATH {
            return None;
        }

        url.query_pairs()
            .find(|(name, _)| name == FROM_PARAM)
            .map(|(_, from)| Self::new(from.into_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub text: String,
    pub url: String,
}

/// Disciplinas > {code}
pub fn breadcrumbs(key: &SubjectKey) -> Vec<Breadcrumb> {
    vec![
        Breadcrumb {
            text: messages::SUBJECTS_BREADCRUMB.to_string(),
            url: SUBJECTS_PATH.to_string(),
        },
        Breadcrumb {
            text: key.code.clone(),
            url: subject_path(key),
        },
    ]
}
