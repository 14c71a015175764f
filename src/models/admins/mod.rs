pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::{Admin, AdminRole};
pub use requests::{
    CreateAdminRequest, LoginRequest, NewAdmin, UpdateAdminRequest, UpdateCredentialsRequest,
};
pub use responses::LoginResponse;
