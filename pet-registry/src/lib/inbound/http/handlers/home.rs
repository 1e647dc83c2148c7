pub async fn home() -> &'static str {
    "Welcome to the pet registry API. Sign up at /auth/signup, log in at /auth/login \
     and send the token as 'Authorization: Bearer <token>' to reach /api."
}
