pub mod controller;
pub mod events;
pub mod factory;
pub mod view;

pub use controller::EnrollmentController;
pub use events::{EnrollmentDomainEvent, EnrollmentEventPort};
pub use factory::EnrollmentControllerFactory;
pub use view::EnrollmentView;
