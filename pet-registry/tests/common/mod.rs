#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use auth::TokenService;
use pet_registry::authentication::ports::AuthServicePort;
use pet_registry::authentication::service::AuthService;
use pet_registry::domain::pet::service::PetService;
use pet_registry::domain::user::models::Password;
use pet_registry::domain::user::models::Username;
use pet_registry::domain::user::service::UserService;
use pet_registry::inbound::http::router::create_router;
use pet_registry::outbound::repositories::InMemoryPetRepository;
use pet_registry::outbound::repositories::InMemoryUserRepository;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &str =
    "dGVzdC1zZWNyZXQta2V5LWZvci1qd3Qtc2lnbmluZy1hdC1sZWFzdC0zMi1ieXRlcw==";
pub const TOKEN_LIFETIME_SECS: i64 = 3600;
pub const ADMIN_USERNAME: &str = "root";
pub const ADMIN_PASSWORD: &str = "rootpassword";

/// Test application that spawns a real server over in-memory repositories
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub tokens: TokenService,
}

fn token_service() -> TokenService {
    TokenService::new(
        JwtHandler::from_base64_secret(JWT_SECRET).expect("Invalid test secret"),
        chrono::Duration::seconds(TOKEN_LIFETIME_SECS),
    )
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp.
    ///
    /// The admin account `root` is bootstrapped before the server starts, so
    /// it always has id 1.
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Cheap hashing keeps the suite fast
        let password_hasher = PasswordHasher::with_cost(256, 1).expect("Invalid hasher cost");
        let authenticator = Arc::new(
            Authenticator::new(password_hasher.clone(), token_service())
                .expect("Failed to build authenticator"),
        );

        let pet_repository = Arc::new(InMemoryPetRepository::new());
        let user_repository = Arc::new(InMemoryUserRepository::new(Arc::clone(&pet_repository)));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_repository),
            authenticator,
        ));
        let user_service = Arc::new(UserService::new(user_repository, password_hasher));
        let pet_service = Arc::new(PetService::new(pet_repository));

        auth_service
            .bootstrap_admin(
                Username::new(ADMIN_USERNAME.to_string()).unwrap(),
                Password::new(ADMIN_PASSWORD.to_string()).unwrap(),
            )
            .await
            .expect("Failed to bootstrap admin");

        let router = create_router(auth_service, user_service, pet_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            tokens: token_service(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path))
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path))
    }

    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.put(path).bearer_auth(token)
    }

    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.delete(path).bearer_auth(token)
    }

    /// Register a user and return its id.
    pub async fn signup(&self, username: &str, password: &str) -> i64 {
        let response = self
            .post("/auth/signup")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_i64().expect("Missing user id")
    }

    /// Log in and return the bearer token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Sign up, log in, and return `(id, token)`.
    pub async fn register(&self, username: &str, password: &str) -> (i64, String) {
        let id = self.signup(username, password).await;
        let token = self.login(username, password).await;
        (id, token)
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    /// Create a pet as the token's owner and return its id.
    pub async fn create_pet(&self, token: &str, name: &str) -> i64 {
        let response = self
            .post_authenticated("/api/pet", token)
            .json(&pet_body("DOG", "Labrador", name, "2020-01-01"))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_i64().expect("Missing pet id")
    }
}

pub fn pet_body(species: &str, breed: &str, name: &str, birthdate: &str) -> Value {
    json!({
        "species": species,
        "breed": breed,
        "name": name,
        "birthdate": birthdate,
    })
}
