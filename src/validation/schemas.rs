//! Endpoint schemas for the user routes.

use once_cell::sync::Lazy;

use super::checks::{
    is_valid_username, BearerAccessToken, CredentialsMatch, EmailNotRegistered, EmailRegistered,
    ForgotPasswordTokenCheck, OldPasswordMatches, ProductsExist, RefreshTokenCheck, SameAsPassword,
    SignedToken, UsernameAvailable, PASSWORD_MAX_LEN, PASSWORD_MIN_LEN,
};
use super::rule::{make_optional, FieldRule};
use super::schema::Schema;
use crate::auth::TokenKind;
use crate::messages::users;

fn first_name() -> FieldRule {
    FieldRule::new("first_name")
        .required(users::FIRST_NAME_IS_REQUIRED)
        .string(users::FIRST_NAME_MUST_BE_A_STRING)
        .trim()
        .length(1, 30, users::FIRST_NAME_LENGTH_MUST_BE_FROM_1_TO_30)
}

fn last_name() -> FieldRule {
    FieldRule::new("last_name")
        .required(users::LAST_NAME_IS_REQUIRED)
        .string(users::LAST_NAME_MUST_BE_A_STRING)
        .trim()
        .length(1, 30, users::LAST_NAME_LENGTH_MUST_BE_FROM_1_TO_30)
}

fn email() -> FieldRule {
    FieldRule::new("email")
        .required(users::EMAIL_IS_REQUIRED)
        .string(users::EMAIL_IS_INVALID)
        .trim()
        .email(users::EMAIL_IS_INVALID)
}

fn password() -> FieldRule {
    FieldRule::new("password")
        .required(users::PASSWORD_IS_REQUIRED)
        .string(users::PASSWORD_MUST_BE_A_STRING)
        .length(
            PASSWORD_MIN_LEN,
            PASSWORD_MAX_LEN,
            users::PASSWORD_LENGTH_MUST_BE_FROM_8_TO_30,
        )
}

fn confirm_password() -> FieldRule {
    FieldRule::new("confirm_password")
        .required(users::CONFIRM_PASSWORD_IS_REQUIRED)
        .string(users::CONFIRM_PASSWORD_MUST_BE_A_STRING)
        .length(
            PASSWORD_MIN_LEN,
            PASSWORD_MAX_LEN,
            users::CONFIRM_PASSWORD_LENGTH_MUST_BE_FROM_8_TO_30,
        )
        .custom(SameAsPassword)
}

fn avatar() -> FieldRule {
    FieldRule::new("avatar")
        .optional()
        .string(users::IMAGE_URL_MUST_BE_A_STRING)
        .trim()
}

fn forgot_password_token() -> FieldRule {
    FieldRule::new("forgot_password_token")
        .trim()
        .custom(ForgotPasswordTokenCheck)
}

pub static LOGIN: Lazy<Schema> = Lazy::new(|| {
    Schema::body(
        "login",
        vec![email().custom(CredentialsMatch), password()],
    )
});

pub static REGISTER: Lazy<Schema> = Lazy::new(|| {
    Schema::body(
        "register",
        vec![
            first_name(),
            last_name(),
            email().custom(EmailNotRegistered),
            password(),
            confirm_password(),
            avatar().url(users::IMAGE_URL_MUST_BE_VALID),
        ],
    )
});

pub static FORGOT_PASSWORD: Lazy<Schema> = Lazy::new(|| {
    Schema::body("forgot_password", vec![email().custom(EmailRegistered)])
});

pub static VERIFY_FORGOT_PASSWORD_TOKEN: Lazy<Schema> = Lazy::new(|| {
    Schema::body("verify_forgot_password_token", vec![forgot_password_token()])
});

pub static RESET_PASSWORD: Lazy<Schema> =
    Lazy::new(|| Schema::body("reset_password", vec![password(), confirm_password()]));

pub static EMAIL_VERIFY_TOKEN: Lazy<Schema> = Lazy::new(|| {
    Schema::body(
        "email_verify_token",
        vec![FieldRule::new("email_verify_token").trim().custom(SignedToken {
            kind: TokenKind::EmailVerifyToken,
            required: users::EMAIL_VERIFY_TOKEN_IS_REQUIRED,
        })],
    )
});

pub static ACCESS_TOKEN: Lazy<Schema> = Lazy::new(|| {
    Schema::headers(
        "access_token",
        vec![FieldRule::new("Authorization").trim().custom(BearerAccessToken)],
    )
});

pub static REFRESH_TOKEN: Lazy<Schema> = Lazy::new(|| {
    Schema::body(
        "refresh_token",
        vec![FieldRule::new("refresh_token").trim().custom(RefreshTokenCheck)],
    )
});

pub static CHANGE_PASSWORD: Lazy<Schema> = Lazy::new(|| {
    Schema::body(
        "change_password",
        vec![
            password().renamed("old_password").custom(OldPasswordMatches),
            password(),
            confirm_password(),
        ],
    )
});

pub static UPDATE_ME: Lazy<Schema> = Lazy::new(|| {
    Schema::body(
        "update_me",
        vec![
            make_optional(&first_name()),
            make_optional(&last_name()),
            FieldRule::new("location")
                .optional()
                .string(users::LOCATION_MUST_BE_A_STRING)
                .trim()
                .length(1, 200, users::LOCATION_LENGTH_MUST_BE_FROM_1_TO_200),
            FieldRule::new("username")
                .optional()
                .string(users::USERNAME_MUST_BE_A_STRING)
                .trim()
                .matches(is_valid_username, users::USERNAME_IS_INVALID)
                .custom(UsernameAvailable),
            avatar(),
        ],
    )
});

pub static ADD_TO_WISHLIST: Lazy<Schema> = Lazy::new(|| {
    Schema::body(
        "add_to_wishlist",
        vec![FieldRule::new("productId").custom(ProductsExist)],
    )
});

pub static REMOVE_FROM_WISHLIST: Lazy<Schema> = Lazy::new(|| {
    Schema::body(
        "remove_from_wishlist",
        vec![FieldRule::new("productId").custom(ProductsExist)],
    )
});
