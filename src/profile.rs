//! Profile domain: the record under edit, its field names, and the account identity.

pub mod field;
pub mod identity;
pub mod province;
pub mod record;

pub use field::ProfileField;
pub use identity::UserIdentity;
pub use province::PROVINCES;
pub use record::{
    DistanceUnit, NotificationChannel, NotificationPreferences, ProfileRecord, DEFAULT_COUNTRY,
};
