pub mod authorization;
pub mod comments;
pub mod counts;
pub mod deletion;
pub mod follow;
pub mod posts;
pub mod views;

pub use comments::CommentService;
pub use counts::CommentCountService;
pub use deletion::DeletionService;
pub use follow::FollowService;
pub use posts::PostService;
pub use views::QueryService;
