/// Payment tokens are opaque credentials carried in the `Authorization`
/// header. A token is valid when it matches one of the tokens provisioned
/// at startup.
pub fn is_valid_payment_token(accept_tokens: &[String], token: &str) -> bool {
    accept_tokens.iter().any(|accepted| accepted == token)
}
