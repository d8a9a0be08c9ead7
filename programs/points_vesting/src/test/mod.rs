pub mod test_access;
pub mod test_claims;
