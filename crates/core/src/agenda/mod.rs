mod composite;
mod dates;
mod error;
mod mock_data;
mod operations;
mod pinning;
mod requests;
mod resolver;
mod types;
mod window;

pub use composite::{composite_id, split_occurrence_id, OccurrenceRef, COMPOSITE_SEPARATOR};
pub use dates::{
    format_local_date, is_supported_date, next_occurrence, parse_local_date,
    weekdays_starting_from, MAX_YEAR, MIN_YEAR,
};
pub use error::{
    CompositeIdError, DateParseError, EventError, ResolveError, TeacherError, WindowError,
};
pub use mock_data::{generate_seed_events, generate_seed_teachers};
pub use operations::{
    group_recurring_by_weekday, validate_event, validate_teacher, weekday_label, WeekdayGroup,
};
pub use pinning::{matches_pin, PinConfig, PinParseError, PinRule, WeekdayPinRule};
pub use requests::{
    CreateEventRequest, CreateTeacherRequest, UpdateEventRequest, UpdateTeacherRequest,
};
pub use resolver::{
    get_occurrence, merge_occurrences, project_recurring, resolve_occurrences, sort_occurrences,
};
pub use types::{
    ClassLevel, EventClass, EventOrganizer, EventPractice, EventPricing, EventType,
    MilongaPreClass, Occurrence, SeminarDay, TangoEvent, Teacher,
};
pub use window::{QueryWindow, MAX_WINDOW_DAYS};
