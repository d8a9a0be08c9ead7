use anchor_lang::prelude::*;

#[error_code]
pub enum PointsVestingError {
    // Access control errors
    #[msg("Only owner can perform this action")]
    OnlyOwner,
    #[msg("Only owner or an admin can perform this action")]
    NotAdmin,
    #[msg("Ledger is paused")]
    Paused,
    #[msg("Ledger is already paused")]
    AlreadyPaused,
    #[msg("Ledger is not paused")]
    NotPaused,

    // Admin registry errors
    #[msg("Account is already an admin")]
    AlreadyAdmin,
    #[msg("Account is not an admin")]
    AdminNotFound,
    #[msg("Admin registry is full")]
    AdminRegistryFull,

    // Argument validation errors
    #[msg("Invalid user account")]
    InvalidUser,
    #[msg("Invalid amount")]
    InvalidAmount,
    #[msg("Batch arrays differ in length")]
    LengthMismatch,
    #[msg("Batch is empty")]
    EmptyBatch,
    #[msg("Batch exceeds the maximum size")]
    BatchTooLarge,
    #[msg("Lock period must be between 1 and 365 days")]
    LockPeriodOutOfRange,
    #[msg("No points to claim")]
    NothingToClaim,
    #[msg("No points to forfeit")]
    NothingToForfeit,

    // Claim state errors
    #[msg("Claim does not exist")]
    ClaimNotFound,
    #[msg("Claim has already been withdrawn")]
    AlreadyWithdrawn,
    #[msg("Claim is still locked")]
    ClaimLocked,

    // Skip registry errors
    #[msg("User has already skipped")]
    AlreadySkipped,
    #[msg("User has opted out of claiming")]
    UserSkipped,
    #[msg("Skip state is frozen once a claim exists")]
    SkipFrozen,
    #[msg("Operation not available for this ledger's skip mode")]
    SkipModeMismatch,
    #[msg("Account is busy with another operation")]
    ReentrantCall,

    // Reserve errors
    #[msg("Insufficient reserve balance")]
    InsufficientReserve,
    #[msg("Reserve transfer failed")]
    ExternalTransferFailed,

    // System level errors
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Account does not match the expected ledger record")]
    AccountMismatch,
    #[msg("Token mint does not match ledger's token mint")]
    TokenMintMismatch,
}

/// Coarse classification of [`PointsVestingError`] for off-chain clients that only care
/// about the failure category (retry on `ExternalTransferFailed`, surface
/// `PermissionDenied`, ...). The program itself never branches on it.
///
/// Clients decode the custom error code of a failed transaction back into
/// `PointsVestingError` and call [`PointsVestingError::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    PermissionDenied,
    InvalidArgument,
    NotFound,
    AlreadyDone,
    NotYetEligible,
    InsufficientReserve,
    StateConflict,
    ExternalTransferFailed,
    Internal,
}

impl PointsVestingError {
    pub fn kind(&self) -> ErrorKind {
        use PointsVestingError::*;
        match self {
            OnlyOwner | NotAdmin | Paused => ErrorKind::PermissionDenied,
            InvalidUser | InvalidAmount | LengthMismatch | EmptyBatch | BatchTooLarge
            | LockPeriodOutOfRange | NothingToClaim | NothingToForfeit => {
                ErrorKind::InvalidArgument
            }
            ClaimNotFound | AdminNotFound => ErrorKind::NotFound,
            AlreadyAdmin | AlreadyWithdrawn | AlreadySkipped | AlreadyPaused => {
                ErrorKind::AlreadyDone
            }
            ClaimLocked => ErrorKind::NotYetEligible,
            InsufficientReserve => ErrorKind::InsufficientReserve,
            UserSkipped | SkipFrozen | SkipModeMismatch | ReentrantCall | NotPaused
            | AdminRegistryFull => ErrorKind::StateConflict,
            ExternalTransferFailed => ErrorKind::ExternalTransferFailed,
            ArithmeticOverflow | AccountMismatch | TokenMintMismatch => ErrorKind::Internal,
        }
    }
}
