pub mod product;
pub mod user;

pub use product::{AddProductResponse, NewProduct, Product};
pub use user::{
    LoginPayload, LoginResponse, NewUser, RegisterPayload, RegisterResponse, User, UserSummary,
};
