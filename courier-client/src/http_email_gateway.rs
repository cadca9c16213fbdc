/*
    Copyright 2025 MydriaTech AB

    Licensed under the Apache License 2.0 with Free world makers exception
    1.0.0 (the "License"); you may not use this file except in compliance with
    the License. You should have obtained a copy of the License with the source
    or binary distribution in file named

        LICENSE-Apache-2.0-with-FWM-Exception-1.0.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.
*/

//! Delivery of messages using an HTTP mail API.

use courier_common::collab::EmailGateway;
use courier_common::model::CourierError;
use courier_common::model::CourierErrorKind;
use reqwest::blocking::Client;
use reqwest::blocking::ClientBuilder;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

/// Request body understood by the mail API.
#[derive(Debug, Serialize)]
struct MailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/** [EmailGateway] that posts each message as a JSON document to an HTTP mail
API.

Any non-2xx response is treated as a failure to deliver the message.
*/
pub struct HttpEmailGateway {
    endpoint: String,
    api_key: String,
    sender: String,
    // Client uses an Arc internally, so it doesn't need Arc<> wrapping here
    client: Client,
}

impl HttpEmailGateway {
    const MIME_APPLICATION_JSON: &'static str = "application/json";

    /// Return a new instance.
    pub fn new(
        endpoint: &str,
        api_key: &str,
        sender: &str,
        app_name_lowercase: &str,
        app_version: &str,
        timeout_secs: u64,
    ) -> Result<Self, CourierError> {
        let user_agent = format!("{app_name_lowercase}/{app_version}");
        log::debug!("user_agent: {user_agent}. endpoint: {endpoint}");
        let client = ClientBuilder::new()
            .user_agent(user_agent)
            .referer(false)
            .timeout(core::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                CourierErrorKind::Unspecified
                    .error_with_msg(format!("Failed to create HTTP client: {e}"))
            })?;
        Ok(Self {
            endpoint: endpoint.to_owned(),
            api_key: api_key.to_owned(),
            sender: sender.to_owned(),
            client,
        })
    }

    fn request_body(&self, address: &str, subject: &str, message: &str) -> String {
        serde_json::to_string(&MailRequest {
            from: &self.sender,
            to: address,
            subject,
            html: message,
        })
        .unwrap_or_default()
    }
}

impl EmailGateway for HttpEmailGateway {
    fn send(&self, address: &str, subject: &str, message: &str) -> Result<(), CourierError> {
        let request_json_string = self.request_body(address, subject, message);
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("Sending body: {request_json_string}");
        }
        let mut request = self
            .client
            .post(&self.endpoint)
            .body(request_json_string)
            .header(&CONTENT_TYPE, Self::MIME_APPLICATION_JSON);
        if !self.api_key.is_empty() {
            request = request.header(&AUTHORIZATION, format!("Bearer {}", self.api_key));
        }
        let response = request.send().map_err(|e| {
            log::info!("Failed request to {}: {:?}", self.endpoint, e.without_url());
            CourierErrorKind::CollaboratorFailure
                .error_with_msg(format!("Mail API request to '{}' failed.", self.endpoint))
        })?;
        if !response.status().is_success() {
            Err(CourierErrorKind::CollaboratorFailure.error_with_msg(format!(
                "Mail API at '{}' responded {} when sending '{subject}' to '{address}'.",
                self.endpoint,
                response.status()
            )))?;
        }
        log::debug!("Sent '{subject}' to '{address}'.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() -> Result<(), CourierError> {
        let gateway = HttpEmailGateway::new(
            "http://localhost/mail",
            "",
            "deliveries@example.com",
            "courier",
            "0.0.0",
            1,
        )?;
        let body: serde_json::Value = serde_json::from_str(&gateway.request_body(
            "fred@example.com",
            "Subject",
            "Body <b>bold</b>",
        ))?;
        assert_eq!(
            body,
            serde_json::json!({
                "from": "deliveries@example.com",
                "to": "fred@example.com",
                "subject": "Subject",
                "html": "Body <b>bold</b>",
            })
        );
        Ok(())
    }

    fn gateway(endpoint: &str) -> Result<HttpEmailGateway, CourierError> {
        HttpEmailGateway::new(endpoint, "secret", "deliveries@example.com", "courier", "0.0.0", 1)
    }

    #[test]
    fn unreachable_endpoint_fails() -> Result<(), CourierError> {
        let e = gateway("http://127.0.0.1:1/mail")?
            .send("fred@example.com", "Subject", "Body")
            .unwrap_err();
        assert_eq!(e.kind(), &CourierErrorKind::CollaboratorFailure);
        Ok(())
    }

    #[test]
    fn error_status_fails() -> Result<(), Box<dyn std::error::Error>> {
        use std::io::Read;
        use std::io::Write;
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let endpoint = format!("http://{}/mail", listener.local_addr()?);
        let server = std::thread::spawn(move || -> std::io::Result<String> {
            let (mut stream, _) = listener.accept()?;
            stream.set_read_timeout(Some(core::time::Duration::from_millis(200)))?;
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            // Read until the client goes quiet
            while let Ok(n) = stream.read(&mut buf) {
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(
                b"HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
            )?;
            Ok(String::from_utf8_lossy(&request).into_owned())
        });
        let e = gateway(&endpoint)?
            .send("fred@example.com", "Subject", "Body")
            .unwrap_err();
        assert_eq!(e.kind(), &CourierErrorKind::CollaboratorFailure);
        let request = server.join().map_err(|_| "server thread panicked")??;
        assert!(request.starts_with("POST /mail "));
        assert!(request.to_lowercase().contains("authorization: bearer secret"));
        Ok(())
    }
}
