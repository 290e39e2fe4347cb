use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::header::ACCEPT;
use reqwest::multipart::Form;
use reqwest::{Client, Method, Url};

use super::error::TransportError;
use super::{ReportTransport, StatusReport, SubmitReply, SubmitRequest};

/// Query parameter that turns the form action into the status address.
pub const STATUS_QUERY: &str = "status";

/// Returns the status address for a form action: the same URL with
/// `status=1` appended to its query.
pub fn status_address(action: &str) -> Result<Url, TransportError> {
    let mut url = parse_action(action)?;
    url.query_pairs_mut().append_pair(STATUS_QUERY, "1");
    Ok(url)
}

fn parse_action(action: &str) -> Result<Url, TransportError> {
    Url::parse(action).map_err(|e| TransportError::InvalidUrl {
        action: action.to_string(),
        reason: e.to_string(),
    })
}

fn parse_method(method: &str) -> Result<Method, TransportError> {
    Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|_| TransportError::InvalidMethod(method.to_string()))
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds the HTTP client.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("berichtform/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl ReportTransport for HttpTransport {
    fn submit(
        &self,
        request: SubmitRequest,
    ) -> BoxFuture<'static, Result<SubmitReply, TransportError>> {
        let client = self.client.clone();
        async move {
            let url = parse_action(&request.action)?;
            let method = parse_method(&request.method)?;
            let form = request
                .fields
                .into_iter()
                .fold(Form::new(), |form, (name, value)| form.text(name, value));

            let response = client
                .request(method, url)
                .header(ACCEPT, request.accept)
                .multipart(form)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            tracing::debug!(status, "submission answered");
            Ok(SubmitReply { status, body })
        }
        .boxed()
    }

    fn fetch_status(
        &self,
        action: String,
    ) -> BoxFuture<'static, Result<StatusReport, TransportError>> {
        let client = self.client.clone();
        async move {
            let url = status_address(&action)?;
            let report = client
                .get(url)
                .header(ACCEPT, "application/json")
                .send()
                .await?
                .error_for_status()?
                .json::<StatusReport>()
                .await?;
            Ok(report)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod status_url {
        use super::*;

        #[test]
        fn appends_query_to_bare_action() {
            let url = status_address("https://example.org/bericht").unwrap();
            assert_eq!(url.as_str(), "https://example.org/bericht?status=1");
        }

        #[test]
        fn keeps_existing_query() {
            let url = status_address("https://example.org/exec?id=abc").unwrap();
            assert_eq!(url.as_str(), "https://example.org/exec?id=abc&status=1");
        }

        #[test]
        fn relative_action_is_rejected() {
            let err = status_address("/bericht").unwrap_err();
            assert!(matches!(err, TransportError::InvalidUrl { .. }));
        }
    }

    mod method {
        use super::*;

        #[test]
        fn lowercase_html_method_is_accepted() {
            assert_eq!(parse_method("post").unwrap(), Method::POST);
        }

        #[test]
        fn garbage_method_is_rejected() {
            let err = parse_method("po st").unwrap_err();
            assert!(matches!(err, TransportError::InvalidMethod(m) if m == "po st"));
        }
    }

    #[test]
    fn client_builds() {
        assert!(HttpTransport::new().is_ok());
    }
}
