//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    // Appointment models
    AppointmentResponse,
    CreateAppointmentRequest,
    // Patient models
    CreatePatientRequest,
    // Professional models
    CreateProfessionalRequest,
    // User models
    CreateUserRequest,
    HealthCheck,
    LinkUserRequest,
    PatientResponse,
    ProfessionalResponse,
    UpdateAppointmentRequest,
    UpdateAppointmentStatusRequest,
    UpdatePatientRequest,
    UpdateProfessionalRequest,
    UpdateUserRequest,
    UserResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::health::health_check,
        // User endpoints
        super::users::list_users,
        super::users::create_user,
        super::users::get_user,
        super::users::update_user,
        super::users::delete_user,
        // Professional endpoints
        super::professionals::list_professionals,
        super::professionals::create_professional,
        super::professionals::get_professional,
        super::professionals::update_professional,
        super::professionals::delete_professional,
        super::professionals::link_user,
        super::professionals::unlink_user,
        super::professionals::list_professional_appointments,
        // Patient endpoints
        super::patients::list_patients,
        super::patients::create_patient,
        super::patients::get_patient,
        super::patients::update_patient,
        super::patients::delete_patient,
        super::patients::list_patient_appointments,
        // Appointment endpoints
        super::appointments::list_appointments,
        super::appointments::book_appointment,
        super::appointments::get_appointment,
        super::appointments::update_appointment,
        super::appointments::update_appointment_status,
    ),
    info(
        title = "Cedin Manager API",
        version = "0.1.0",
        description = "Clinic scheduling backend: staff, professionals, patients, appointments",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "User", description = "Staff accounts"),
        (name = "Professional", description = "Practitioners and their account link"),
        (name = "Patient", description = "Patients identified by DNI"),
        (name = "Appointment", description = "Booking, rescheduling and status changes"),
    ),
    components(
        schemas(
            HealthCheck,
            // User
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            // Professional
            CreateProfessionalRequest,
            UpdateProfessionalRequest,
            LinkUserRequest,
            ProfessionalResponse,
            // Patient
            CreatePatientRequest,
            UpdatePatientRequest,
            PatientResponse,
            // Appointment
            CreateAppointmentRequest,
            UpdateAppointmentRequest,
            UpdateAppointmentStatusRequest,
            AppointmentResponse,
        )
    ),
)]
pub struct ApiDoc;
