pub mod current_session;
pub mod log_in;
pub mod log_out;
pub mod sign_up;

pub use current_session::{CurrentSessionResponse, CurrentSessionUseCase};
pub use log_in::{LogInCommand, LogInResponse, LogInUseCase};
pub use log_out::LogOutUseCase;
pub use sign_up::{SignUpCommand, SignUpResponse, SignUpUseCase};
