use actix_web::cookie::Cookie;
use actix_web::HttpRequest;
use serde::Serialize;

pub const FLASH_MESSAGE_COOKIE: &str = "flash_message";
pub const FLASH_ERROR_COOKIE: &str = "flash_error";

/// One-time notification carried across a redirect in a cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Flash {
    Message(String),
    Error(String),
}

impl Flash {
    pub fn message(text: impl Into<String>) -> Self {
        Flash::Message(text.into())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Flash::Error(text.into())
    }

    pub fn text(&self) -> &str {
        match self {
            Flash::Message(text) | Flash::Error(text) => text,
        }
    }

    fn cookie_name(&self) -> &'static str {
        match self {
            Flash::Message(_) => FLASH_MESSAGE_COOKIE,
            Flash::Error(_) => FLASH_ERROR_COOKIE,
        }
    }

    pub fn to_cookie(&self) -> Cookie<'static> {
        Cookie::build(self.cookie_name(), urlencoding::encode(self.text()).into_owned())
            .path("/")
            .http_only(true)
            .finish()
    }

    /// Reads the flash left by the previous response, errors first.
    pub fn from_request(req: &HttpRequest) -> Option<Self> {
        let read = |name: &str| {
            req.cookie(name).and_then(|cookie| {
                urlencoding::decode(cookie.value())
                    .map(|text| text.into_owned())
                    .map_err(|err| tracing::warn!("Dropping undecodable flash cookie: {:?}", err))
                    .ok()
            })
        };

        read(FLASH_ERROR_COOKIE)
            .map(Flash::Error)
            .or_else(|| read(FLASH_MESSAGE_COOKIE).map(Flash::Message))
    }

    /// Cookies that expire both flash kinds once they have been shown.
    pub fn removal_cookies() -> [Cookie<'static>; 2] {
        [FLASH_MESSAGE_COOKIE, FLASH_ERROR_COOKIE].map(|name| {
            let mut cookie = Cookie::build(name, "").path("/").finish();
            cookie.make_removal();
            cookie
        })
    }
}
