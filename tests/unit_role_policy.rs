use keygate::middleware::role::role_allows;
use keygate::modules::users::model::UserRole;

#[test]
fn test_user_passes_user_gate() {
    assert!(role_allows(UserRole::User, &[UserRole::User]));
}

#[test]
fn test_admin_passes_admin_gate() {
    assert!(role_allows(UserRole::Admin, &[UserRole::Admin]));
}

#[test]
fn test_admin_passes_user_only_gate() {
    // Admins pass every declared set, even one naming only `user`
    assert!(role_allows(UserRole::Admin, &[UserRole::User]));
}

#[test]
fn test_admin_passes_empty_gate() {
    assert!(role_allows(UserRole::Admin, &[]));
}

#[test]
fn test_user_rejected_from_admin_gate() {
    assert!(!role_allows(UserRole::User, &[UserRole::Admin]));
}

#[test]
fn test_user_rejected_from_empty_gate() {
    assert!(!role_allows(UserRole::User, &[]));
}

#[test]
fn test_role_parse_accepts_known_roles() {
    assert_eq!("user".parse::<UserRole>().unwrap(), UserRole::User);
    assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
}

#[test]
fn test_role_parse_rejects_unknown_roles() {
    assert!("root".parse::<UserRole>().is_err());
    assert!("".parse::<UserRole>().is_err());
    assert!("ADMIN".parse::<UserRole>().is_err());
}
