pub mod dispatch;
pub mod email;
pub mod template;

pub use dispatch::dispatch_confirmation;
pub use email::EmailNotifier;
