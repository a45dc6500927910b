pub mod booking;
pub mod booking_input;
pub mod booking_view;
pub mod client;
pub mod client_input;
pub mod show;
pub mod show_input;
pub mod staff;
pub mod staff_input;
pub mod types;

pub use booking::Booking;
pub use booking_input::{
    AssignSlotInput, BookingMutationResponse, CreateBookingInput, SetHeadcountInput,
    UpdateBookingInput,
};
pub use booking_view::{BookingView, DayView, StaffRef, UNNAMED_STAFF};
pub use client::{Client, Contact};
pub use client_input::{ClientMutationResponse, CreateClientInput, UpdateClientInput};
pub use show::Show;
pub use show_input::{CreateShowInput, ShowMutationResponse};
pub use staff::Staff;
pub use staff_input::{CreateStaffInput, StaffMutationResponse, UpdateStaffInput};
pub use types::{BookingStatus, Location, Season, ShowType, StaffStatus};
