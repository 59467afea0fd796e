use super::*;

#[tokio::test]
async fn explicit_user_variable_wins() {
    std::env::set_var(USER_VAR, "ada");
    let user = EnvSessionProvider.current_user().await.unwrap();
    std::env::remove_var(USER_VAR);

    assert_eq!(user.id, "ada");
    assert!(user.name.is_none());
}
