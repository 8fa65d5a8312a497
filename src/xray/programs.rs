use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program::ID as SYSTEM_PROGRAM_ID;
use std::str::FromStr;

/// Well-known program ids and their display names
pub const KNOWN_PROGRAMS: [(&str, Pubkey); 10] = [
    ("SYSTEM_PROGRAM", SYSTEM_PROGRAM_ID),
    ("TOKEN_PROGRAM", pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA")),
    ("ASSOCIATED_TOKEN", pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL")),
    ("METADATA_PROGRAM", pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s")),
    ("MEMO_PROGRAM", pubkey!("MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr")),
    ("NAME_PROGRAM", pubkey!("namesLPneVptA9Z5rqUDD9tMTWEJwofgaYwp8cawRkX")),
    ("RAYDIUM_V4", pubkey!("675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8")),
    ("ORCA_V2", pubkey!("9W959DqEETiGZocYWCQPaJ6sBmUzgfxXfqGeTEdp3aQP")),
    ("JUPITER_V3", pubkey!("JUP3c2Uh3WA4Ng34tw6kPd2G4C5BB21Xo36Je1s32Ph")),
    ("MAGIC_EDEN_V2", pubkey!("M2mx93ekt1fmXSVkTrUL9xVFHkmME8HTUi5Cyc5aF7K")),
];

/// Name of a well-known program, or the id itself
pub fn program_name(program_id: &str) -> String {
    Pubkey::from_str(program_id)
        .ok()
        .and_then(|key| KNOWN_PROGRAMS.iter().find(|(_, id)| *id == key))
        .map(|(name, _)| name.to_string())
        .unwrap_or_else(|| program_id.to_string())
}
