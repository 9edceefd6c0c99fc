//! Request types for the user endpoints

use serde::Deserialize;

/// Profile update request: every field is optional and absent fields
/// keep their current value. The frontend posts untouched form fields
/// as empty strings, which count as absent too. Changing the password
/// requires both the current and the new password.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub bio: Option<String>,
    pub link: Option<String>,
    /// New profile image as a data URI
    pub profile_img: Option<String>,
    /// New cover image as a data URI
    pub cover_img: Option<String>,
}

impl UpdateProfileRequest {
    /// Drop empty-string fields so they read as absent
    pub fn normalized(self) -> Self {
        fn non_empty(field: Option<String>) -> Option<String> {
            field.filter(|value| !value.is_empty())
        }

        Self {
            full_name: non_empty(self.full_name),
            email: non_empty(self.email),
            username: non_empty(self.username),
            current_password: non_empty(self.current_password),
            new_password: non_empty(self.new_password),
            bio: non_empty(self.bio),
            link: non_empty(self.link),
            profile_img: non_empty(self.profile_img),
            cover_img: non_empty(self.cover_img),
        }
    }
}
