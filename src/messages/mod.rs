//! User-facing message catalog, keyed by scenario.

pub mod users {
    pub const VALIDATION_ERROR: &str = "Validation error";

    pub const FIRST_NAME_IS_REQUIRED: &str = "First name is required";
    pub const FIRST_NAME_MUST_BE_A_STRING: &str = "First name must be a string";
    pub const FIRST_NAME_LENGTH_MUST_BE_FROM_1_TO_30: &str =
        "First name length must be from 1 to 30";
    pub const LAST_NAME_IS_REQUIRED: &str = "Last name is required";
    pub const LAST_NAME_MUST_BE_A_STRING: &str = "Last name must be a string";
    pub const LAST_NAME_LENGTH_MUST_BE_FROM_1_TO_30: &str = "Last name length must be from 1 to 30";

    pub const EMAIL_IS_REQUIRED: &str = "Email is required";
    pub const EMAIL_IS_INVALID: &str = "Email is invalid";
    pub const EMAIL_ALREADY_EXISTS: &str = "Email already exists";
    pub const EMAIL_OR_PASSWORD_IS_INCORRECT: &str = "Email or password is incorrect";

    pub const PASSWORD_IS_REQUIRED: &str = "Password is required";
    pub const PASSWORD_MUST_BE_A_STRING: &str = "Password must be a string";
    pub const PASSWORD_LENGTH_MUST_BE_FROM_8_TO_30: &str = "Password length must be from 8 to 30";
    pub const CONFIRM_PASSWORD_IS_REQUIRED: &str = "Confirm password is required";
    pub const CONFIRM_PASSWORD_MUST_BE_A_STRING: &str = "Confirm password must be a string";
    pub const CONFIRM_PASSWORD_LENGTH_MUST_BE_FROM_8_TO_30: &str =
        "Confirm password length must be from 8 to 30";
    pub const CONFIRM_PASSWORD_MUST_BE_THE_SAME_AS_PASSWORD: &str =
        "Confirm password must be the same as password";
    pub const OLD_PASSWORD_NOT_MATCH: &str = "Old password not match";

    pub const IMAGE_URL_MUST_BE_A_STRING: &str = "Image url must be a string";
    pub const IMAGE_URL_MUST_BE_VALID: &str = "Image url must be valid";
    pub const LOCATION_MUST_BE_A_STRING: &str = "Location must be a string";
    pub const LOCATION_LENGTH_MUST_BE_FROM_1_TO_200: &str = "Location length must be from 1 to 200";
    pub const USERNAME_MUST_BE_A_STRING: &str = "Username must be a string";
    pub const USERNAME_IS_INVALID: &str =
        "Username must be 4-15 characters of letters, digits or underscores and not only digits";
    pub const USERNAME_ALREADY_EXISTS: &str = "Username already exists";

    pub const ACCESS_TOKEN_IS_REQUIRED: &str = "Access token is required";
    pub const REFRESH_TOKEN_IS_REQUIRED: &str = "Refresh token is required";
    pub const USED_REFRESH_TOKEN_OR_NOT_EXIST: &str = "Used refresh token or not exist";
    pub const EMAIL_VERIFY_TOKEN_IS_REQUIRED: &str = "Email verify token is required";
    pub const FORGOT_PASSWORD_TOKEN_IS_REQUIRED: &str = "Forgot password token is required";
    pub const FORGOT_PASSWORD_TOKEN_IS_INCORRECT: &str = "Forgot password token is incorrect";

    pub const USER_NOT_FOUND: &str = "User not found";
    pub const USER_IS_NOT_VERIFIED: &str = "User is not verified";
    pub const EMAIL_ALREADY_VERIFIED: &str = "Email already verified";

    pub const LOGIN_SUCCESS: &str = "Login success";
    pub const REGISTER_SUCCESS: &str = "Register success";
    pub const LOGOUT_SUCCESS: &str = "Logout success";
    pub const REFRESH_TOKEN_SUCCESS: &str = "Refresh token success";
    pub const EMAIL_VERIFY_SUCCESS: &str = "Email verify success";
    pub const CHECK_EMAIL_TO_RESET_PASSWORD: &str = "Check email to reset password";
    pub const VERIFY_FORGOT_PASSWORD_SUCCESS: &str = "Verify forgot password success";
    pub const RESET_PASSWORD_SUCCESS: &str = "Reset password success";
    pub const CHANGE_PASSWORD_SUCCESS: &str = "Change password success";
    pub const GET_ME_SUCCESS: &str = "Get my profile success";
    pub const UPDATE_ME_SUCCESS: &str = "Update my profile success";
}

pub mod products {
    pub const PRODUCT_ID_IS_REQUIRED: &str = "Product id is required";
    pub const PRODUCT_ID_NOT_ARRAY: &str = "Product id must be an array";
    pub const PRODUCT_ID_IS_INVALID: &str = "Product id is invalid";
    pub const PRODUCT_NOT_FOUND: &str = "Product not found";
    pub const ADD_TO_WISHLIST_SUCCESS: &str = "Add to wishlist success";
    pub const REMOVE_FROM_WISHLIST_SUCCESS: &str = "Remove from wishlist success";
}
