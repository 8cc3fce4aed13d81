pub mod dramabox_service;
pub mod pagination;
pub mod signer;
