//! Unit tests for the captcha controller

mod mocks;
