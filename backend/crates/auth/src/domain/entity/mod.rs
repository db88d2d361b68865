pub mod authenticated_user;
pub mod issued_tokens;
pub mod login_result;
pub mod user_account;

pub use authenticated_user::AuthenticatedUser;
pub use issued_tokens::IssuedTokens;
pub use login_result::{LoginResult, UserSummary};
pub use user_account::UserAccount;
