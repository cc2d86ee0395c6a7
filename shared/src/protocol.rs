use crate::{
    CampusEvent, ConnectRequest, ConnectionRecord, LanguageCode, MatchResult, PREFIX_MATCH,
    StudentProfile,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// `POST` requests are sent with the serialized request as the JSON body;
/// `GET` requests carry everything in the path.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path (with query string, if any).
    fn path(&self) -> String;
}

/// Percent-encode a single path segment (RFC 3986 unreserved characters pass through).
pub fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}

// =========================================================
// Request Definitions
// =========================================================

/// Register a student profile
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct RegisterStudentRequest<'a> {
    pub profile: &'a StudentProfile,
}

impl ApiRequest for RegisterStudentRequest<'_> {
    type Response = StudentEnvelope;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/students/register".to_string()
    }
}

/// Look a student up by username or full name
#[derive(Debug, Serialize)]
pub struct LookupStudentRequest<'a> {
    pub identifier: &'a str,
}

impl ApiRequest for LookupStudentRequest<'_> {
    type Response = StudentEnvelope;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/students/{}", encode_segment(self.identifier))
    }
}

/// AI-suggested language partners
#[derive(Debug, Serialize)]
pub struct ListMatchesRequest<'a> {
    pub name: &'a str,
    pub language: LanguageCode,
}

impl ApiRequest for ListMatchesRequest<'_> {
    type Response = MatchesEnvelope;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!(
            "/api/students/matches/{}?language={}",
            encode_segment(self.name),
            self.language
        )
    }
}

/// Personalized challenge suggestions
#[derive(Debug, Serialize)]
pub struct SuggestChallengesRequest<'a> {
    pub name: &'a str,
    pub language: LanguageCode,
}

impl ApiRequest for SuggestChallengesRequest<'_> {
    type Response = ChallengeSuggestions;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!(
            "/api/challenges/suggest/{}?language={}",
            encode_segment(self.name),
            self.language
        )
    }
}

impl ApiRequest for ConnectRequest {
    type Response = serde_json::Value;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/connections/connect".to_string()
    }
}

/// Connections of one student
#[derive(Debug, Serialize)]
pub struct ListConnectionsRequest<'a> {
    pub student_id: &'a str,
}

impl ApiRequest for ListConnectionsRequest<'_> {
    type Response = ConnectionsEnvelope;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/connections/{}", encode_segment(self.student_id))
    }
}

/// Campus events
#[derive(Debug, Serialize)]
pub struct ListEventsRequest;

impl ApiRequest for ListEventsRequest {
    type Response = EventsEnvelope;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/events".to_string()
    }
}

/// Backend liveness probe
#[derive(Debug, Serialize)]
pub struct HealthCheckRequest;

impl ApiRequest for HealthCheckRequest {
    type Response = serde_json::Value;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/health".to_string()
    }
}

/// Multipart avatar upload path (the body is built by the browser, not serde).
pub const UPLOAD_AVATAR_PATH: &str = "/api/upload-avatar";
/// Multipart field name carrying the avatar file.
pub const UPLOAD_AVATAR_FIELD: &str = "file";

// =========================================================
// Response Envelopes
// =========================================================

/// `{ "student_id": …, "student": profile }` or the bare profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StudentEnvelope {
    Wrapped {
        #[serde(default)]
        student_id: Option<String>,
        student: StudentProfile,
    },
    Bare(StudentProfile),
}

impl StudentEnvelope {
    /// The embedded profile; a missing id falls back to the top-level `student_id`.
    pub fn into_profile(self) -> StudentProfile {
        match self {
            StudentEnvelope::Wrapped {
                student_id,
                mut student,
            } => {
                if student.id.as_deref().is_none_or(|id| id.trim().is_empty()) {
                    student.id = student_id.filter(|id| !id.trim().is_empty());
                }
                student
            }
            StudentEnvelope::Bare(profile) => profile,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchesEnvelope {
    #[serde(default)]
    pub matches: Vec<MatchResult>,
}

impl MatchesEnvelope {
    /// Matches in server order; missing ids become `match-<index>`.
    pub fn into_matches(self) -> Vec<MatchResult> {
        self.matches
            .into_iter()
            .enumerate()
            .map(|(index, mut m)| {
                if m.id.trim().is_empty() {
                    m.id = format!("{}{}", PREFIX_MATCH, index);
                }
                m
            })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChallengeSuggestions {
    #[serde(default)]
    pub personalized_challenges: Vec<String>,
}

/// Either partner ids or full connection records.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ConnectionEntry {
    Record(ConnectionRecord),
    PartnerId(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionsEnvelope {
    #[serde(default)]
    pub connections: Vec<ConnectionEntry>,
}

impl ConnectionsEnvelope {
    pub fn into_partner_ids(self) -> Vec<String> {
        self.connections
            .into_iter()
            .map(|entry| match entry {
                ConnectionEntry::Record(record) => record.partner_id,
                ConnectionEntry::PartnerId(id) => id,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EventsEnvelope {
    Wrapped { events: Vec<CampusEvent> },
    Bare(Vec<CampusEvent>),
}

impl EventsEnvelope {
    pub fn into_events(self) -> Vec<CampusEvent> {
        match self {
            EventsEnvelope::Wrapped { events } => events,
            EventsEnvelope::Bare(events) => events,
        }
    }
}

/// `{ "path": … }` or `{ "url": … }`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadAvatarResponse {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl UploadAvatarResponse {
    pub fn location(self) -> Option<String> {
        self.path
            .or(self.url)
            .filter(|location| !location.trim().is_empty())
    }
}

/// FastAPI error body: `{ "detail": "..." }` (or a list of validation issues).
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub detail: serde_json::Value,
}

impl ErrorDetail {
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .map(str::to_string)
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join("; "))
                }
            }
            _ => None,
        }
    }
}
