//! Transaction normalization ("xray")

pub mod parser;
pub mod programs;
pub mod types;

pub use parser::{attach_parsed, classify, parse_transaction, parse_transactions, ClassificationFault};
pub use programs::{program_name, KNOWN_PROGRAMS};
pub use types::{
    ActionType, EnrichedTransaction, NativeTransfer, ProtonAction, ProtonTransaction, ProtonType,
    TokenTransfer, TransactionKind,
};
