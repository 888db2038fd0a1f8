// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt;

use phf::phf_map;
use unicase::UniCase;

/// The well-known names of request header fields. Field names are
/// case-insensitive, so the lookup of a raw name is as well.
///
/// The raw name as it was received is stored in the
/// [`HeaderMap`](crate::HeaderMap); this type is only used to look fields up
/// and to decide on semantics.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeaderName {
    Other(String),

    Accept,
    AcceptCharset,
    AcceptEncoding,
    AcceptLanguage,
    AccessControlRequestHeaders,
    AccessControlRequestMethod,
    Authorization,
    CacheControl,
    Connection,
    ContentEncoding,
    ContentLength,
    ContentType,
    Cookie,
    DNT,
    EarlyData,
    Expect,
    Forwarded,
    From,
    Host,
    IfMatch,
    IfModifiedSince,
    IfNoneMatch,
    IfRange,
    IfUnmodifiedSince,
    KeepAlive,
    MaxForwards,
    Origin,
    Pragma,
    ProxyAuthorization,
    ProxyConnection,
    Range,
    Referer,
    SecFetchDest,
    SecFetchMode,
    SecFetchSite,
    SecFetchUser,
    SecWebSocketKey,
    SecWebSocketProtocol,
    SecWebSocketVersion,
    TE,
    Trailer,
    TransferEncoding,
    Upgrade,
    UpgradeInsecureRequests,
    UserAgent,
    Via,
    XForwardedFor,
    XRequestedWith,
}

static STRING_TO_HEADER_NAME_MAP: phf::Map<UniCase<&'static str>, HeaderName> = phf_map!(
    UniCase::ascii("accept") => HeaderName::Accept,
    UniCase::ascii("accept-charset") => HeaderName::AcceptCharset,
    UniCase::ascii("accept-encoding") => HeaderName::AcceptEncoding,
    UniCase::ascii("accept-language") => HeaderName::AcceptLanguage,
    UniCase::ascii("access-control-request-headers") => HeaderName::AccessControlRequestHeaders,
    UniCase::ascii("access-control-request-method") => HeaderName::AccessControlRequestMethod,
    UniCase::ascii("authorization") => HeaderName::Authorization,
    UniCase::ascii("cache-control") => HeaderName::CacheControl,
    UniCase::ascii("connection") => HeaderName::Connection,
    UniCase::ascii("content-encoding") => HeaderName::ContentEncoding,
    UniCase::ascii("content-length") => HeaderName::ContentLength,
    UniCase::ascii("content-type") => HeaderName::ContentType,
    UniCase::ascii("cookie") => HeaderName::Cookie,
    UniCase::ascii("dnt") => HeaderName::DNT,
    UniCase::ascii("early-data") => HeaderName::EarlyData,
    UniCase::ascii("expect") => HeaderName::Expect,
    UniCase::ascii("forwarded") => HeaderName::Forwarded,
    UniCase::ascii("from") => HeaderName::From,
    UniCase::ascii("host") => HeaderName::Host,
    UniCase::ascii("if-match") => HeaderName::IfMatch,
    UniCase::ascii("if-modified-since") => HeaderName::IfModifiedSince,
    UniCase::ascii("if-none-match") => HeaderName::IfNoneMatch,
    UniCase::ascii("if-range") => HeaderName::IfRange,
    UniCase::ascii("if-unmodified-since") => HeaderName::IfUnmodifiedSince,
    UniCase::ascii("keep-alive") => HeaderName::KeepAlive,
    UniCase::ascii("max-forwards") => HeaderName::MaxForwards,
    UniCase::ascii("origin") => HeaderName::Origin,
    UniCase::ascii("pragma") => HeaderName::Pragma,
    UniCase::ascii("proxy-authorization") => HeaderName::ProxyAuthorization,
    UniCase::ascii("proxy-connection") => HeaderName::ProxyConnection,
    UniCase::ascii("range") => HeaderName::Range,
    UniCase::ascii("referer") => HeaderName::Referer,
    UniCase::ascii("sec-fetch-dest") => HeaderName::SecFetchDest,
    UniCase::ascii("sec-fetch-mode") => HeaderName::SecFetchMode,
    UniCase::ascii("sec-fetch-site") => HeaderName::SecFetchSite,
    UniCase::ascii("sec-fetch-user") => HeaderName::SecFetchUser,
    UniCase::ascii("sec-websocket-key") => HeaderName::SecWebSocketKey,
    UniCase::ascii("sec-websocket-protocol") => HeaderName::SecWebSocketProtocol,
    UniCase::ascii("sec-websocket-version") => HeaderName::SecWebSocketVersion,
    UniCase::ascii("te") => HeaderName::TE,
    UniCase::ascii("trailer") => HeaderName::Trailer,
    UniCase::ascii("transfer-encoding") => HeaderName::TransferEncoding,
    UniCase::ascii("upgrade") => HeaderName::Upgrade,
    UniCase::ascii("upgrade-insecure-requests") => HeaderName::UpgradeInsecureRequests,
    UniCase::ascii("user-agent") => HeaderName::UserAgent,
    UniCase::ascii("via") => HeaderName::Via,
    UniCase::ascii("x-forwarded-for") => HeaderName::XForwardedFor,
    UniCase::ascii("x-requested-with") => HeaderName::XRequestedWith,
);

impl From<&str> for HeaderName {
    #[must_use]
    fn from(value: &str) -> Self {
        match STRING_TO_HEADER_NAME_MAP.get(&UniCase::ascii(value)) {
            Some(header_name) => header_name.clone(),
            None => HeaderName::Other(value.to_ascii_lowercase()),
        }
    }
}

impl From<String> for HeaderName {
    #[must_use]
    fn from(mut value: String) -> Self {
        match STRING_TO_HEADER_NAME_MAP.get(&UniCase::ascii(&value)) {
            Some(header_name) => header_name.clone(),
            None => {
                value.make_ascii_lowercase();
                HeaderName::Other(value)
            }
        }
    }
}

impl HeaderName {
    /// Does the raw field name `name` denote this field?
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        unicase::eq_ascii(self.to_string_h1(), name)
    }

    #[must_use]
    pub fn to_string_h1(&self) -> &str {
        match self {
            HeaderName::Other(str) => str,

            HeaderName::Accept => "Accept",
            HeaderName::AcceptCharset => "Accept-Charset",
            HeaderName::AcceptEncoding => "Accept-Encoding",
            HeaderName::AcceptLanguage => "Accept-Language",
            HeaderName::AccessControlRequestHeaders => "Access-Control-Request-Headers",
            HeaderName::AccessControlRequestMethod => "Access-Control-Request-Method",
            HeaderName::Authorization => "Authorization",
            HeaderName::CacheControl => "Cache-Control",
            HeaderName::Connection => "Connection",
            HeaderName::ContentEncoding => "Content-Encoding",
            HeaderName::ContentLength => "Content-Length",
            HeaderName::ContentType => "Content-Type",
            HeaderName::Cookie => "Cookie",
            HeaderName::DNT => "DNT",
            HeaderName::EarlyData => "Early-Data",
            HeaderName::Expect => "Expect",
            HeaderName::Forwarded => "Forwarded",
            HeaderName::From => "From",
            HeaderName::Host => "Host",
            HeaderName::IfMatch => "If-Match",
            HeaderName::IfModifiedSince => "If-Modified-Since",
            HeaderName::IfNoneMatch => "If-None-Match",
            HeaderName::IfRange => "If-Range",
            HeaderName::IfUnmodifiedSince => "If-Unmodified-Since",
            HeaderName::KeepAlive => "Keep-Alive",
            HeaderName::MaxForwards => "Max-Forwards",
            HeaderName::Origin => "Origin",
            HeaderName::Pragma => "Pragma",
            HeaderName::ProxyAuthorization => "Proxy-Authorization",
            HeaderName::ProxyConnection => "Proxy-Connection",
            HeaderName::Range => "Range",
            HeaderName::Referer => "Referer",
            HeaderName::SecFetchDest => "Sec-Fetch-Dest",
            HeaderName::SecFetchMode => "Sec-Fetch-Mode",
            HeaderName::SecFetchSite => "Sec-Fetch-Site",
            HeaderName::SecFetchUser => "Sec-Fetch-User",
            HeaderName::SecWebSocketKey => "Sec-WebSocket-Key",
            HeaderName::SecWebSocketProtocol => "Sec-WebSocket-Protocol",
            HeaderName::SecWebSocketVersion => "Sec-WebSocket-Version",
            HeaderName::TE => "TE",
            HeaderName::Trailer => "Trailer",
            HeaderName::TransferEncoding => "Transfer-Encoding",
            HeaderName::Upgrade => "Upgrade",
            HeaderName::UpgradeInsecureRequests => "Upgrade-Insecure-Requests",
            HeaderName::UserAgent => "User-Agent",
            HeaderName::Via => "Via",
            HeaderName::XForwardedFor => "X-Forwarded-For",
            HeaderName::XRequestedWith => "X-Requested-With",
        }
    }
}

impl AsRef<str> for HeaderName {
    fn as_ref(&self) -> &str {
        self.to_string_h1()
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_string_h1())
    }
}
