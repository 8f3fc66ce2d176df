//! Deliver a notification to one recipient with a single call to
//! `chat.postMessage`.

use super::{
    api::{API_BASE, POST_MESSAGE},
    auth::{to_auth_header_val, SlackAccessToken},
    error::SlackError,
    message::Message,
    notification::{Driver, Notifiable, Notification, ResponseHook, Route},
    payload::build_payload,
    transport::{ReqwestTransport, Request, Response, Transport},
};
use tracing::{debug, info};

/// The content type of every request body.
pub const CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Sends notifications via a [Transport].
///
/// The driver name is fixed per dispatcher; configure one dispatcher per
/// driver rather than reconfiguring a shared one.
pub struct Dispatcher<T = ReqwestTransport> {
    transport: T,
    driver: Driver,
    api_base: String,
}

impl Default for Dispatcher<ReqwestTransport> {
    fn default() -> Self {
        Dispatcher::new(ReqwestTransport::default())
    }
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T) -> Self {
        Dispatcher {
            transport,
            driver: Driver::default(),
            api_base: API_BASE.to_owned(),
        }
    }

    /// Look routes up under another driver name than `slack`.
    pub fn with_driver<D: Into<Driver>>(mut self, driver: D) -> Self {
        self.driver = driver.into();
        self
    }

    /// Talk to something other than Slack's production API, such as a test
    /// server.
    pub fn with_api_base<U: Into<String>>(mut self, base: U) -> Self {
        self.api_base = base.into();
        self
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    /// Send `notification` to `notifiable`, returning Slack's raw response.
    ///
    /// Returns `Ok(None)` without making any request if the recipient has no
    /// route for this dispatcher's driver. Otherwise exactly one request is
    /// made.
    pub async fn send<R, N>(&self, notifiable: &R, notification: &N) -> Result<Option<Response>, SlackError>
    where
        R: Notifiable,
        N: Notification<R>,
    {
        let route = match notifiable.route_notification_for(&self.driver, notification) {
            Some(x) => x,
            None => {
                debug!("Recipient has no route for driver {}, skipping", self.driver);
                return Ok(None);
            }
        };

        let token = route
            .access_token()
            .ok_or_else(|| SlackError::MissingToken(self.driver.clone()))?;

        let msg = notification.to_slack(notifiable, &self.driver);
        let req = self.build_request(&msg, &route, &token)?;

        let url = self.api_base.clone() + POST_MESSAGE;
        debug!("Posting {} attachment(s) to {}", msg.attachments.len(), url);

        let res = self.transport.post(&url, req).await?;
        info!("Slack message posted with status {}", res.status);

        Ok(Some(res))
    }

    /// As [Self::send], passing the response through the notification's
    /// [ResponseHook] and returning whatever that makes of it.
    pub async fn send_with_hook<R, N>(
        &self,
        notifiable: &R,
        notification: &N,
    ) -> Result<Option<N::Output>, SlackError>
    where
        R: Notifiable,
        N: Notification<R> + ResponseHook,
    {
        let res = self.send(notifiable, notification).await?;

        Ok(res.map(|r| notification.response(r)))
    }

    /// Put together the request for `msg`: the serialised payload,
    /// authentication and content type, then the message's own overrides.
    pub fn build_request(
        &self,
        msg: &Message,
        route: &Route,
        token: &SlackAccessToken,
    ) -> Result<Request, SlackError> {
        let default_channel = route.default_channel();
        let json = serde_json::to_value(build_payload(msg, default_channel.as_ref()))?;

        Request::new(json)
            .header("Content-type", CONTENT_TYPE)
            .header("Authorization", to_auth_header_val(token))
            .merge(&msg.http)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slack::attachment::Attachment;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    /// Records every request and answers with a fixed response. Clones share
    /// their record.
    #[derive(Clone, Default)]
    struct RecordingTransport {
        requests: Arc<Mutex<Vec<(String, Request)>>>,
    }

    impl RecordingTransport {
        fn requests(&self) -> Vec<(String, Request)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn post(&self, url: &str, req: Request) -> Result<Response, SlackError> {
            self.requests.lock().unwrap().push((url.to_owned(), req));

            Ok(Response {
                status: 200,
                body: r#"{"ok": true, "channel": "C123", "ts": "1.2"}"#.into(),
            })
        }
    }

    struct User {
        route: Option<Route>,
    }

    impl User {
        fn routed() -> Self {
            User {
                route: Some(Route::new("xoxp-token").with_channel("#general")),
            }
        }
    }

    impl Notifiable for User {
        fn route_notification_for<N>(&self, driver: &Driver, _: &N) -> Option<Route>
        where
            N: Notification<Self>,
        {
            match driver.0.as_str() {
                "slack" | "slackApi" => self.route.clone(),
                _ => None,
            }
        }
    }

    /// Builds a fresh message from a plain function each time it's sent.
    struct Notice(fn() -> Message);

    impl Notification<User> for Notice {
        fn to_slack(&self, _: &User, _: &Driver) -> Message {
            (self.0)()
        }
    }

    fn laravel(a: Attachment) -> Attachment {
        a.title("Laravel", Some("https://laravel.com"))
            .content("Attachment Content")
            .fallback("Attachment Fallback")
            .fields([("Project", "Laravel")])
            .footer("Laravel")
            .footer_icon("https://laravel.com/fake.png")
            .markdown(["text"])
    }

    fn with_icon() -> Message {
        Message::new()
            .from("Ghostbot", Some(":ghost:"))
            .to("#ghost-talk")
            .content("Content")
            .attachment(|a| {
                laravel(a)
                    .author(
                        "Author",
                        Some("https://laravel.com/fake_author"),
                        Some("https://laravel.com/fake_author.png"),
                    )
                    .timestamp(1234567890_i64)
            })
    }

    fn with_image_icon() -> Message {
        Message::new()
            .from("Ghostbot", None)
            .image("http://example.com/image.png")
            .to("#ghost-talk")
            .content("Content")
            .attachment(|a| laravel(a).timestamp(1234567890_i64))
    }

    fn with_default_channel() -> Message {
        Message::new()
            .from("Ghostbot", None)
            .image("http://example.com/image.png")
            .content("Content")
            .attachment(|a| laravel(a).timestamp(1234567890_i64))
    }

    fn without_optional_fields() -> Message {
        Message::new().content("Content").attachment(|a| {
            a.title("Laravel", Some("https://laravel.com"))
                .content("Attachment Content")
                .fields([("Project", "Laravel")])
        })
    }

    fn with_field_builder() -> Message {
        Message::new().content("Content").attachment(|a| {
            a.title("Laravel", Some("https://laravel.com"))
                .content("Attachment Content")
                .field("Project", "Laravel")
                .field_with(|f| f.title("Special powers").content("Zonda").long())
        })
    }

    async fn send_one(msg: fn() -> Message) -> Request {
        let transport = RecordingTransport::default();
        let res = Dispatcher::new(transport.clone())
            .send(&User::routed(), &Notice(msg))
            .await
            .unwrap();
        assert!(res.is_some());

        let mut requests = transport.requests();
        assert_eq!(requests.len(), 1);

        let (url, req) = requests.remove(0);
        assert_eq!(url, "https://slack.com/api/chat.postMessage");
        req
    }

    fn expected_headers() -> Vec<(String, String)> {
        vec![
            ("Content-type".to_owned(), CONTENT_TYPE.to_owned()),
            ("Authorization".to_owned(), "Bearer xoxp-token".to_owned()),
        ]
    }

    fn laravel_attachment() -> Value {
        json!({
            "title": "Laravel",
            "title_link": "https://laravel.com",
            "text": "Attachment Content",
            "fallback": "Attachment Fallback",
            "fields": [{ "title": "Project", "value": "Laravel", "short": true }],
            "mrkdwn_in": ["text"],
            "footer": "Laravel",
            "footer_icon": "https://laravel.com/fake.png",
            "ts": 1234567890,
        })
    }

    #[tokio::test]
    async fn test_payload_with_icon() {
        let req = send_one(with_icon).await;

        let mut attachment = laravel_attachment();
        let obj = attachment.as_object_mut().unwrap();
        obj.insert("author_name".into(), json!("Author"));
        obj.insert("author_link".into(), json!("https://laravel.com/fake_author"));
        obj.insert("author_icon".into(), json!("https://laravel.com/fake_author.png"));

        assert_eq!(req.headers, expected_headers());
        assert_eq!(
            req.json,
            json!({
                "username": "Ghostbot",
                "icon_emoji": ":ghost:",
                "channel": "#ghost-talk",
                "text": "Content",
                "attachments": [attachment],
            })
        );
        assert!(req.options.is_empty());
    }

    #[tokio::test]
    async fn test_payload_with_image_icon() {
        let req = send_one(with_image_icon).await;

        assert_eq!(req.headers, expected_headers());
        assert_eq!(
            req.json,
            json!({
                "username": "Ghostbot",
                "icon_url": "http://example.com/image.png",
                "channel": "#ghost-talk",
                "text": "Content",
                "attachments": [laravel_attachment()],
            })
        );
    }

    #[tokio::test]
    async fn test_payload_with_default_channel() {
        let req = send_one(with_default_channel).await;

        assert_eq!(
            req.json,
            json!({
                "username": "Ghostbot",
                "icon_url": "http://example.com/image.png",
                "channel": "#general",
                "text": "Content",
                "attachments": [laravel_attachment()],
            })
        );
    }

    #[tokio::test]
    async fn test_payload_without_optional_fields() {
        let req = send_one(without_optional_fields).await;

        assert_eq!(req.headers, expected_headers());
        assert_eq!(
            req.json,
            json!({
                "text": "Content",
                "attachments": [{
                    "title": "Laravel",
                    "title_link": "https://laravel.com",
                    "text": "Attachment Content",
                    "fields": [{ "title": "Project", "value": "Laravel", "short": true }],
                }],
                "channel": "#general",
            })
        );
    }

    #[tokio::test]
    async fn test_payload_with_attachment_field_builder() {
        let req = send_one(with_field_builder).await;

        assert_eq!(
            req.json,
            json!({
                "text": "Content",
                "attachments": [{
                    "title": "Laravel",
                    "text": "Attachment Content",
                    "title_link": "https://laravel.com",
                    "fields": [
                        { "title": "Project", "value": "Laravel", "short": true },
                        { "title": "Special powers", "value": "Zonda", "short": false },
                    ],
                }],
                "channel": "#general",
            })
        );
    }

    #[tokio::test]
    async fn test_custom_driver_name() {
        let transport = RecordingTransport::default();

        let res = Dispatcher::new(transport.clone())
            .with_driver("slackApi")
            .send(&User::routed(), &Notice(with_icon))
            .await
            .unwrap();

        assert!(res.is_some());
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_driver_is_noop() {
        let transport = RecordingTransport::default();

        let res = Dispatcher::new(transport.clone())
            .with_driver("discord")
            .send(&User::routed(), &Notice(with_icon))
            .await
            .unwrap();

        assert!(res.is_none());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_opted_out_is_noop() {
        let transport = RecordingTransport::default();

        let res = Dispatcher::new(transport.clone())
            .send(&User { route: None }, &Notice(with_icon))
            .await
            .unwrap();

        assert!(res.is_none());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_token() {
        let transport = RecordingTransport::default();
        let user = User {
            route: Some(Route::default().with_channel("#general")),
        };

        let res = Dispatcher::new(transport.clone()).send(&user, &Notice(with_icon)).await;

        assert!(matches!(res, Err(SlackError::MissingToken(d)) if d == Driver::default()));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_http_overrides_win() {
        fn with_overrides() -> Message {
            let overrides = json!({
                "headers": { "Authorization": "Bearer override" },
                "timeout": 5,
            });

            Message::new()
                .content("Content")
                .http(overrides.as_object().cloned().unwrap_or_default())
        }

        let req = send_one(with_overrides).await;

        assert_eq!(
            req.headers,
            vec![("Authorization".to_owned(), "Bearer override".to_owned())]
        );
        assert_eq!(req.options.get("timeout"), Some(&json!(5)));
        assert_eq!(req.json, json!({ "text": "Content", "attachments": [], "channel": "#general" }));
    }

    #[tokio::test]
    async fn test_response_hook() {
        struct Threaded;

        impl Notification<User> for Threaded {
            fn to_slack(&self, _: &User, _: &Driver) -> Message {
                Message::new().content("Content")
            }
        }

        impl ResponseHook for Threaded {
            type Output = Option<String>;

            fn response(&self, res: Response) -> Option<String> {
                res.api_result().ok().map(|posted| posted.ts)
            }
        }

        let transport = RecordingTransport::default();
        let res = Dispatcher::new(transport.clone())
            .send_with_hook(&User::routed(), &Threaded)
            .await
            .unwrap();

        assert_eq!(res, Some(Some("1.2".to_owned())));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_response_hook_skipped_when_opted_out() {
        struct Counted;

        impl Notification<User> for Counted {
            fn to_slack(&self, _: &User, _: &Driver) -> Message {
                Message::new().content("Content")
            }
        }

        impl ResponseHook for Counted {
            type Output = ();

            fn response(&self, _: Response) {
                panic!("no response to handle");
            }
        }

        let transport = RecordingTransport::default();
        let res = Dispatcher::new(transport.clone())
            .send_with_hook(&User { route: None }, &Counted)
            .await
            .unwrap();

        assert_eq!(res, None);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_raw_response_by_default() {
        let transport = RecordingTransport::default();
        let res = Dispatcher::new(transport.clone())
            .send(&User::routed(), &Notice(without_optional_fields))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(res.api_result().unwrap().ts, "1.2");
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        struct Failing;

        #[async_trait]
        impl Transport for Failing {
            async fn post(&self, _: &str, _: Request) -> Result<Response, SlackError> {
                Err(SlackError::APIResponseError("boom".into()))
            }
        }

        let res = Dispatcher::new(Failing)
            .send(&User::routed(), &Notice(with_icon))
            .await;

        assert!(matches!(res, Err(SlackError::APIResponseError(e)) if e == "boom"));
    }
}
