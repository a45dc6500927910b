use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ShowStaff API",
        version = "1.0.0",
        description = "Backend API for the ShowStaff trade-show staffing CRM",
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // Health
        crate::handlers::health::health_check,

        // Staff
        crate::handlers::staff_handler::get_staff_list,
        crate::handlers::staff_handler::create_staff,
        crate::handlers::staff_handler::get_staff,
        crate::handlers::staff_handler::update_staff,
        crate::handlers::staff_handler::delete_staff,

        // Clients
        crate::handlers::clients_handler::get_clients,
        crate::handlers::clients_handler::create_client,
        crate::handlers::clients_handler::get_client,
        crate::handlers::clients_handler::update_client,
        crate::handlers::clients_handler::delete_client,

        // Shows
        crate::handlers::shows_handler::get_shows,
        crate::handlers::shows_handler::create_show,
        crate::handlers::shows_handler::get_show,
        crate::handlers::shows_handler::delete_show,

        // Bookings
        crate::handlers::bookings_handler::get_bookings,
        crate::handlers::bookings_handler::get_bookings_grouped,
        crate::handlers::bookings_handler::create_booking,
        crate::handlers::bookings_handler::get_booking,
        crate::handlers::bookings_handler::update_booking,
        crate::handlers::bookings_handler::delete_booking,
        crate::handlers::bookings_handler::set_day_headcount,
        crate::handlers::bookings_handler::set_all_headcounts,
        crate::handlers::bookings_handler::assign_day_slot,
        crate::handlers::bookings_handler::copy_previous_day,
        crate::handlers::bookings_handler::auto_fill_day,

        // Uploads
        crate::handlers::uploads_handler::upload_photo,
        crate::handlers::uploads_handler::upload_resume,
        crate::handlers::uploads_handler::delete_photo,

        // Assistant
        crate::handlers::assistant_handler::chat,
    ),
    components(
        schemas(
            // Core models
            crate::models::Staff,
            crate::models::Client,
            crate::models::Contact,
            crate::models::Show,
            crate::models::Booking,
            crate::models::BookingView,
            crate::models::DayView,
            crate::models::StaffRef,
            crate::staffing::DayEntry,

            // Enums
            crate::models::Location,
            crate::models::ShowType,
            crate::models::Season,
            crate::models::StaffStatus,
            crate::models::BookingStatus,

            // Inputs
            crate::models::CreateStaffInput,
            crate::models::UpdateStaffInput,
            crate::models::CreateClientInput,
            crate::models::UpdateClientInput,
            crate::models::CreateShowInput,
            crate::models::CreateBookingInput,
            crate::models::UpdateBookingInput,
            crate::models::SetHeadcountInput,
            crate::models::AssignSlotInput,

            // Responses
            crate::models::StaffMutationResponse,
            crate::models::ClientMutationResponse,
            crate::models::ShowMutationResponse,
            crate::models::BookingMutationResponse,
            crate::views::GroupedBookings,
            crate::views::StaffingTotals,
            crate::handlers::uploads_handler::UploadResponse,
            crate::handlers::uploads_handler::DeletePhotoInput,
            crate::handlers::uploads_handler::DeletePhotoResponse,
            crate::handlers::assistant_handler::ChatInput,
            crate::handlers::assistant_handler::ChatResponse,
            crate::assistant::ChatMessage,

            // Errors
            crate::error::FieldError,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "staff", description = "Staff roster management"),
        (name = "clients", description = "Client companies and contacts"),
        (name = "shows", description = "Trade-show catalog"),
        (name = "bookings", description = "Bookings and daily staffing plans"),
        (name = "uploads", description = "Photo and resume storage"),
        (name = "assistant", description = "Tool-calling chat assistant"),
    )
)]
pub struct ApiDoc;
