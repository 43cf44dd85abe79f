//! Repository adapters for the data API (`/rest/v1`).
//!
//! One adapter serves the profile, catalogue and portfolio ports. Filters use
//! the data API's `column=eq.value` syntax and embedded resources such as
//! `universities(name)`.

use async_trait::async_trait;
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use super::client::SupabaseClient;
use super::dto::{
    AcademicSelectionPatch, AchievementRow, CareerRow, ProfileRow, ProjectRow, UniversityRow,
};
use crate::domain::ports::{
    CatalogueRepository, CatalogueRepositoryError, PortfolioRepository, PortfolioRepositoryError,
    ProfileRepository, ProfileRepositoryError,
};
use crate::domain::{
    AcademicSelection, Achievement, Career, ProfileCompleteness, Project, PublicProfile,
    ReferenceId, SessionToken, University, UserId, Username,
};
use crate::outbound::status_message;

const PROFILE_COLUMNS: &str =
    "id,username,full_name,bio,avatar_url,universities(name),careers(name)";
const PROJECT_COLUMNS: &str =
    "id,title,description,technologies,featured,repository_url,demo_url,created_at";
const ACHIEVEMENT_COLUMNS: &str = "id,title,issuer,description,category,achieved_on";

/// Failure shared by every table call before it is mapped to a port error.
#[derive(Debug)]
enum RestFailure {
    Connection(String),
    Query(String),
    Decode(String),
}

impl From<RestFailure> for CatalogueRepositoryError {
    fn from(failure: RestFailure) -> Self {
        match failure {
            RestFailure::Connection(message) => Self::connection(message),
            RestFailure::Query(message) | RestFailure::Decode(message) => Self::query(message),
        }
    }
}

impl From<RestFailure> for ProfileRepositoryError {
    fn from(failure: RestFailure) -> Self {
        match failure {
            RestFailure::Connection(message) => Self::connection(message),
            RestFailure::Query(message) => Self::query(message),
            RestFailure::Decode(message) => Self::decode(message),
        }
    }
}

impl From<RestFailure> for PortfolioRepositoryError {
    fn from(failure: RestFailure) -> Self {
        match failure {
            RestFailure::Connection(message) => Self::connection(message),
            RestFailure::Query(message) => Self::query(message),
            RestFailure::Decode(message) => Self::decode(message),
        }
    }
}

/// Table reads and writes against the data API.
#[derive(Clone)]
pub struct SupabaseRestRepository {
    client: SupabaseClient,
}

impl SupabaseRestRepository {
    /// Wrap a shared project client.
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn table_url(&self, table: &str, params: &[(&str, String)]) -> Result<Url, RestFailure> {
        let mut url = self
            .client
            .endpoint(&format!("rest/v1/{table}"))
            .map_err(|err| RestFailure::Connection(format!("invalid data API URL: {err}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
        token: Option<&SessionToken>,
    ) -> Result<Vec<T>, RestFailure> {
        let url = self.table_url(table, params)?;
        let response = self
            .client
            .request(Method::GET, url, token)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        serde_json::from_slice(body.as_ref())
            .map_err(|err| RestFailure::Decode(format!("{table}: {err}")))
    }

    /// PATCH matching rows and return how many the store reports as changed.
    ///
    /// Rows hidden by row-level security or absent altogether still answer
    /// with a success status, so callers must check the count.
    async fn update<B: Serialize + Sync>(
        &self,
        table: &str,
        params: &[(&str, String)],
        body: &B,
        token: &SessionToken,
    ) -> Result<usize, RestFailure> {
        let mut params = params.to_vec();
        params.push(("select", "id".to_owned()));
        let url = self.table_url(table, &params)?;
        let response = self
            .client
            .request(Method::PATCH, url, Some(token))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }
        let rows: Vec<IgnoredAny> = serde_json::from_slice(bytes.as_ref())
            .map_err(|err| RestFailure::Decode(format!("{table} update: {err}")))?;
        Ok(rows.len())
    }

    async fn find_profile(
        &self,
        filter: (&str, String),
        token: Option<&SessionToken>,
    ) -> Result<Option<PublicProfile>, PortfolioRepositoryError> {
        let rows: Vec<ProfileRow> = self
            .select(
                "profiles",
                &[
                    ("select", PROFILE_COLUMNS.to_owned()),
                    filter,
                    ("limit", "1".to_owned()),
                ],
                token,
            )
            .await?;
        rows.into_iter()
            .next()
            .map(ProfileRow::into_domain)
            .transpose()
            .map_err(PortfolioRepositoryError::decode)
    }
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

#[async_trait]
impl ProfileRepository for SupabaseRestRepository {
    async fn fetch_completeness(
        &self,
        user_id: &UserId,
        access_token: &SessionToken,
    ) -> Result<Option<ProfileCompleteness>, ProfileRepositoryError> {
        let rows: Vec<ProfileCompleteness> = self
            .select(
                "profiles",
                &[
                    ("select", "university_id,career_id".to_owned()),
                    ("id", eq(user_id)),
                    ("limit", "1".to_owned()),
                ],
                Some(access_token),
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn save_academic_selection(
        &self,
        user_id: &UserId,
        access_token: &SessionToken,
        selection: &AcademicSelection,
    ) -> Result<(), ProfileRepositoryError> {
        let patch = AcademicSelectionPatch {
            university_id: selection.university_id(),
            career_id: selection.career_id(),
        };
        let updated = self
            .update("profiles", &[("id", eq(user_id))], &patch, access_token)
            .await?;
        require_updated(updated, user_id)
    }
}

#[async_trait]
impl CatalogueRepository for SupabaseRestRepository {
    async fn list_universities(&self) -> Result<Vec<University>, CatalogueRepositoryError> {
        let rows: Vec<UniversityRow> = self
            .select(
                "universities",
                &[
                    ("select", "id,name,short_name".to_owned()),
                    ("order", "name.asc".to_owned()),
                ],
                None,
            )
            .await?;
        Ok(rows.into_iter().map(University::from).collect())
    }

    async fn list_careers(
        &self,
        university_id: &ReferenceId,
    ) -> Result<Vec<Career>, CatalogueRepositoryError> {
        let rows: Vec<CareerRow> = self
            .select(
                "careers",
                &[
                    ("select", "id,name,university_id".to_owned()),
                    ("university_id", eq(university_id)),
                    ("order", "name.asc".to_owned()),
                ],
                None,
            )
            .await?;
        Ok(rows.into_iter().map(Career::from).collect())
    }

    async fn find_career(
        &self,
        career_id: &ReferenceId,
    ) -> Result<Option<Career>, CatalogueRepositoryError> {
        let rows: Vec<CareerRow> = self
            .select(
                "careers",
                &[
                    ("select", "id,name,university_id".to_owned()),
                    ("id", eq(career_id)),
                    ("limit", "1".to_owned()),
                ],
                None,
            )
            .await?;
        Ok(rows.into_iter().next().map(Career::from))
    }
}

#[async_trait]
impl PortfolioRepository for SupabaseRestRepository {
    async fn find_profile_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<PublicProfile>, PortfolioRepositoryError> {
        self.find_profile(("username", eq(username)), None).await
    }

    async fn find_profile_by_id(
        &self,
        user_id: &UserId,
        access_token: Option<SessionToken>,
    ) -> Result<Option<PublicProfile>, PortfolioRepositoryError> {
        self.find_profile(("id", eq(user_id)), access_token.as_ref())
            .await
    }

    async fn list_projects(
        &self,
        user_id: &UserId,
        access_token: Option<SessionToken>,
    ) -> Result<Vec<Project>, PortfolioRepositoryError> {
        let rows: Vec<ProjectRow> = self
            .select(
                "projects",
                &[
                    ("select", PROJECT_COLUMNS.to_owned()),
                    ("user_id", eq(user_id)),
                ],
                access_token.as_ref(),
            )
            .await?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn list_achievements(
        &self,
        user_id: &UserId,
        access_token: Option<SessionToken>,
    ) -> Result<Vec<Achievement>, PortfolioRepositoryError> {
        let rows: Vec<AchievementRow> = self
            .select(
                "achievements",
                &[
                    ("select", ACHIEVEMENT_COLUMNS.to_owned()),
                    ("user_id", eq(user_id)),
                ],
                access_token.as_ref(),
            )
            .await?;
        Ok(rows.into_iter().map(Achievement::from).collect())
    }
}

fn require_updated(rows: usize, user_id: &UserId) -> Result<(), ProfileRepositoryError> {
    if rows == 0 {
        return Err(ProfileRepositoryError::query(format!(
            "no profile row updated for user {user_id}"
        )));
    }
    Ok(())
}

fn map_transport_error(error: reqwest::Error) -> RestFailure {
    RestFailure::Connection(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RestFailure {
    let message = status_message(status, body);
    if status.is_server_error() || status == StatusCode::REQUEST_TIMEOUT {
        RestFailure::Connection(message)
    } else {
        RestFailure::Query(message)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for URL building and error mapping.
    use super::*;
    use crate::outbound::supabase::SupabaseConfig;
    use actix_web::{App, HttpResponse, HttpServer, web};
    use rstest::rstest;
    use serde_json::json;
    use std::net::TcpListener;
    use std::time::Duration;
    use zeroize::Zeroizing;

    const USER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn repository() -> SupabaseRestRepository {
        repository_at("https://abcd.supabase.co")
    }

    fn repository_at(base_url: &str) -> SupabaseRestRepository {
        let client = SupabaseClient::new(SupabaseConfig {
            base_url: Url::parse(base_url).expect("base url"),
            anon_key: Zeroizing::new("anon".to_owned()),
            timeout: Duration::from_secs(5),
        })
        .expect("client builds");
        SupabaseRestRepository::new(client)
    }

    #[test]
    fn table_urls_encode_filters() {
        let user = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("id");
        let url = repository()
            .table_url(
                "profiles",
                &[
                    ("select", PROFILE_COLUMNS.to_owned()),
                    ("id", eq(&user)),
                ],
            )
            .expect("url");
        assert_eq!(url.path(), "/rest/v1/profiles");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("select".to_owned(), PROFILE_COLUMNS.to_owned()),
                (
                    "id".to_owned(),
                    "eq.3fa85f64-5717-4562-b3fc-2c963f66afa6".to_owned()
                ),
            ]
        );
    }

    #[rstest]
    #[case(ReferenceId::Numeric(5), "eq.5")]
    #[case(ReferenceId::Text("uba".to_owned()), "eq.uba")]
    fn references_filter_by_their_display_form(#[case] id: ReferenceId, #[case] expected: &str) {
        assert_eq!(eq(&id), expected);
    }

    #[rstest]
    #[case::unavailable(StatusCode::SERVICE_UNAVAILABLE, true)]
    #[case::timeout(StatusCode::REQUEST_TIMEOUT, true)]
    #[case::bad_filter(StatusCode::BAD_REQUEST, false)]
    #[case::rls(StatusCode::UNAUTHORIZED, false)]
    fn statuses_split_connection_from_query(#[case] status: StatusCode, #[case] connection: bool) {
        let failure = map_status_error(status, b"{\"message\":\"boom\"}");
        assert_eq!(matches!(failure, RestFailure::Connection(_)), connection);
    }

    #[test]
    fn decode_failures_keep_their_kind_for_profile_ports() {
        let error = ProfileRepositoryError::from(RestFailure::Decode("profiles: bad".to_owned()));
        assert!(matches!(error, ProfileRepositoryError::Decode { .. }));
        let error = CatalogueRepositoryError::from(RestFailure::Decode("careers: bad".to_owned()));
        assert!(matches!(error, CatalogueRepositoryError::Query { .. }));
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    fn saves_require_a_changed_row(#[case] rows: usize, #[case] saved: bool) {
        let user = UserId::new(USER).expect("id");
        let result = require_updated(rows, &user);
        assert_eq!(result.is_ok(), saved);
        if let Err(error) = result {
            assert!(matches!(error, ProfileRepositoryError::Query { .. }));
            assert!(error.message().contains(USER));
        }
    }

    /// Serve one canned PATCH answer on a loopback port.
    fn serve_patch(
        status: u16,
        body: Option<serde_json::Value>,
    ) -> (String, actix_web::dev::ServerHandle) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        let server = HttpServer::new(move || {
            let body = body.clone();
            App::new().route(
                "/rest/v1/profiles",
                web::patch().to(move || {
                    let body = body.clone();
                    async move {
                        let mut builder = HttpResponse::build(
                            actix_web::http::StatusCode::from_u16(status).expect("status"),
                        );
                        match body {
                            Some(json) => builder.json(json),
                            None => builder.finish(),
                        }
                    }
                }),
            )
        })
        .workers(1)
        .listen(listener)
        .expect("listen")
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        (format!("http://{addr}"), handle)
    }

    fn selection() -> AcademicSelection {
        AcademicSelection::try_new(Some(ReferenceId::Numeric(1)), Some(ReferenceId::Numeric(10)))
            .expect("selection")
    }

    #[rstest]
    #[case::no_matching_row(200, Some(json!([])))]
    #[case::minimal_reply(204, None)]
    #[actix_web::test]
    async fn unconfirmed_profile_updates_are_errors(
        #[case] status: u16,
        #[case] body: Option<serde_json::Value>,
    ) {
        let (base, handle) = serve_patch(status, body);
        let user = UserId::new(USER).expect("id");
        let token = SessionToken::new("jwt").expect("token");

        let result = repository_at(&base)
            .save_academic_selection(&user, &token, &selection())
            .await;

        handle.stop(false).await;
        assert!(result.is_err(), "expected failure, got {result:?}");
    }

    #[actix_web::test]
    async fn confirmed_profile_update_succeeds() {
        let (base, handle) = serve_patch(200, Some(json!([{ "id": USER }])));
        let user = UserId::new(USER).expect("id");
        let token = SessionToken::new("jwt").expect("token");

        let result = repository_at(&base)
            .save_academic_selection(&user, &token, &selection())
            .await;

        handle.stop(false).await;
        assert!(result.is_ok(), "expected success, got {result:?}");
    }
}
