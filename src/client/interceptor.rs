//! Pre-send interception: bearer credential attachment.

use reqwest::RequestBuilder;

use crate::auth::AuthTokens;

/// Attach `Authorization: Bearer <access>` when a token pair exists.
///
/// With no stored pair the request goes out untouched. Attachment never
/// blocks, never performs network I/O, and never writes the store.
pub(crate) fn attach_authorization(
    builder: RequestBuilder,
    tokens: Option<&AuthTokens>,
) -> RequestBuilder {
    match tokens {
        Some(tokens) => builder.bearer_auth(&tokens.access_token),
        None => builder,
    }
}
