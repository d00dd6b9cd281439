//! Google Classroom API access through an authorized OAuth client
//!
//! Only what the dashboard needs to confirm the OAuth handoff: listing the
//! signed-in user's courses.

use serde::Deserialize;
use url::Url;

use crate::oauth::{AuthorizedClient, OAuthError};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub section: Option<String>,
    pub course_state: Option<String>,
}

/// One page of `courses.list`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePage {
    #[serde(default)]
    pub courses: Vec<Course>,
    pub next_page_token: Option<String>,
}

pub struct ClassroomClient<'a> {
    client: &'a dyn AuthorizedClient,
    api_base: String,
}

impl<'a> ClassroomClient<'a> {
    #[must_use]
    pub fn new(client: &'a dyn AuthorizedClient, api_base: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// URL of `courses.list` for the given page
    ///
    /// # Errors
    ///
    /// Returns `OAuthError::Configuration` if the API base URL is invalid
    pub fn courses_url(&self, page_token: Option<&str>) -> Result<Url, OAuthError> {
        let mut url = Url::parse(&format!("{}/courses", self.api_base)).map_err(|e| {
            OAuthError::Configuration(format!("invalid Classroom API base URL: {e}"))
        })?;
        if let Some(token) = page_token {
            url.query_pairs_mut().append_pair("pageToken", token);
        }
        Ok(url)
    }

    /// List one page of courses visible to the authorized user
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API base URL is invalid
    /// - The provider call fails
    /// - The response is not a `courses.list` page
    pub async fn list_courses(&self, page_token: Option<&str>) -> Result<CoursePage, OAuthError> {
        let url = self.courses_url(page_token)?;
        let body = self.client.get_json(url.as_str()).await?;
        serde_json::from_value(body)
            .map_err(|e| OAuthError::Provider(format!("unexpected courses.list response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Returns a canned body and records requested URLs
    struct CannedClient {
        body: Value,
        requested: Mutex<Vec<String>>,
    }

    impl CannedClient {
        fn new(body: Value) -> Self {
            Self {
                body,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AuthorizedClient for CannedClient {
        async fn get_json(&self, url: &str) -> Result<Value, OAuthError> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(self.body.clone())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl AuthorizedClient for FailingClient {
        async fn get_json(&self, _url: &str) -> Result<Value, OAuthError> {
            Err(OAuthError::Provider("401 Unauthorized".to_string()))
        }
    }

    #[actix_web::test]
    async fn test_list_courses_parses_page() {
        let canned = CannedClient::new(json!({
            "courses": [
                { "id": "123", "name": "Biology", "section": "Period 2", "courseState": "ACTIVE" },
                { "id": "456", "name": "Chemistry" }
            ],
            "nextPageToken": "page-2"
        }));
        let classroom = ClassroomClient::new(&canned, "https://classroom.googleapis.com/v1/");

        let page = classroom.list_courses(None).await.unwrap();
        assert_eq!(page.courses.len(), 2);
        assert_eq!(page.courses[0].course_state.as_deref(), Some("ACTIVE"));
        assert_eq!(page.courses[1].section, None);
        assert_eq!(page.next_page_token.as_deref(), Some("page-2"));
        assert_eq!(
            canned.requested.lock().unwrap().as_slice(),
            ["https://classroom.googleapis.com/v1/courses".to_string()]
        );
    }

    #[actix_web::test]
    async fn test_empty_account_has_no_courses() {
        let canned = CannedClient::new(json!({}));
        let classroom = ClassroomClient::new(&canned, "https://classroom.googleapis.com/v1");
        assert_eq!(classroom.list_courses(None).await.unwrap(), CoursePage::default());
    }

    #[test]
    fn test_page_token_is_encoded() {
        let canned = CannedClient::new(json!({}));
        let classroom = ClassroomClient::new(&canned, "https://classroom.googleapis.com/v1");
        let url = classroom.courses_url(Some("a/b+c")).unwrap();
        assert_eq!(url.query(), Some("pageToken=a%2Fb%2Bc"));
    }

    #[actix_web::test]
    async fn test_provider_failures_propagate() {
        let classroom = ClassroomClient::new(&FailingClient, "https://classroom.googleapis.com/v1");
        let err = classroom.list_courses(None).await.unwrap_err();
        assert!(matches!(err, OAuthError::Provider(_)));
    }

    #[actix_web::test]
    async fn test_unexpected_body_is_provider_error() {
        let canned = CannedClient::new(json!({ "courses": "not-a-list" }));
        let classroom = ClassroomClient::new(&canned, "https://classroom.googleapis.com/v1");
        let err = classroom.list_courses(None).await.unwrap_err();
        assert!(err.to_string().contains("courses.list"));
    }
}
