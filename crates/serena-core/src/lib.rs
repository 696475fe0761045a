//! # serena-core
//!
//! Domain types and pure logic for the Serena wellness booking service:
//! appointments and their lifecycle, contact messages, the therapy
//! catalog, user accounts, field validation, and the admin query engine.
//! Everything here is synchronous and transport-agnostic; the HTTP
//! surface lives in `serena-api`.

pub mod appointment;
pub mod catalog;
pub mod contact;
pub mod query;
pub mod service;
pub mod store;
pub mod therapy;
pub mod user;
pub mod validate;

pub use appointment::{Appointment, AppointmentStatus, NewAppointment};
pub use catalog::{Catalog, Course, CourseSummary, CourseWeek, Testimonial};
pub use contact::{Contact, ContactDraft, ContactSource, ContactStatus, NewContact};
pub use query::{AppointmentFilter, Page};
pub use service::ServiceType;
pub use store::{Store, UserStore};
pub use therapy::{Currency, NewTherapy, Therapy, TherapyCategory, TherapyDraft};
pub use user::{NewUser, RegisterDraft, Role, SubscribeDraft, Subscription, User, UserProfile};
pub use validate::{AppointmentDraft, FieldError};
