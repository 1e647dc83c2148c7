pub mod memory;
pub mod pet;
pub mod user;

pub use memory::InMemoryPetRepository;
pub use memory::InMemoryUserRepository;
pub use pet::PostgresPetRepository;
pub use user::PostgresUserRepository;
