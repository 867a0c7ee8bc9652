mod verification_store;

pub use verification_store::{
    normalize_identity, VerificationStore, CODE_EXPIRY_MINUTES, SWEEP_MAX_AGE_MINUTES,
};
