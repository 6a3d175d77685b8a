//! Flash-style notices
//!
//! Write operations answer with a redirect to `/`; the outcome rides the
//! redirect as query-string parameters (`kind`, `notice`) and the dashboard
//! view echoes it back to the presentation layer. This replaces the
//! session-cookie flash of a classic server-rendered dashboard without
//! introducing session state.

use axum::response::Redirect;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Outcome class of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A one-shot, user-visible message about the previous operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// Encode as `kind=…&notice=…` for the redirect location.
    pub fn to_query(&self) -> String {
        let kind = match self.kind {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        };
        serde_urlencoded::to_string([("kind", kind), ("notice", self.message.as_str())])
            .unwrap_or_default()
    }

    /// The post-operation redirect back to the status view.
    pub fn redirect(&self) -> Redirect {
        Redirect::to(&format!("/?{}", self.to_query()))
    }
}

/// Query parameters the dashboard accepts to echo a notice back.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct NoticeParams {
    /// Message carried over from the previous operation
    pub notice: Option<String>,
    /// "success" or "error"
    pub kind: Option<String>,
}

impl NoticeParams {
    pub fn into_notice(self) -> Option<Notice> {
        let message = self.notice?;
        let kind = match self.kind.as_deref() {
            Some("success") => NoticeKind::Success,
            _ => NoticeKind::Error,
        };
        Some(Notice { kind, message })
    }
}
