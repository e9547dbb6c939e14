//! Formatting helpers shared by the tool handlers.

use ethers::{
    types::{Address, H256, U256},
    utils::{format_units, to_checksum},
};

/// Formats a wei amount as a decimal token amount, trailing zeros trimmed
/// ("5.0" style, matching what explorers show).
pub fn format_native(amount: U256) -> String {
    let full = match format_units(amount, 18) {
        Ok(s) => s,
        Err(_) => amount.to_string(),
    };
    match full.split_once('.') {
        Some((int, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                format!("{int}.0")
            } else {
                format!("{int}.{frac}")
            }
        }
        None => full,
    }
}

/// Checksummed 0x address for display.
pub fn display_address(address: Address) -> String {
    to_checksum(&address, None)
}

/// Wormholescan link for a bridge transaction.
pub fn wormholescan_tx_url(tx_hash: H256) -> String {
    format!("https://wormholescan.io/#/tx/{tx_hash:#x}?network=Testnet&view=overview")
}

/// Etherscan link for an address on Sepolia.
pub fn sepolia_address_url(address: Address) -> String {
    format!(
        "https://sepolia.etherscan.io/address/{}",
        to_checksum(&address, None)
    )
}

/// Monad explorer link for an address on Monad testnet.
pub fn monad_address_url(address: Address) -> String {
    format!(
        "https://testnet.monadexplorer.com/address/{}",
        to_checksum(&address, None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::utils::parse_ether;

    #[test]
    fn trims_trailing_zeros_but_keeps_one_fraction_digit() {
        assert_eq!(format_native(parse_ether("5").unwrap()), "5.0");
        assert_eq!(format_native(parse_ether("5.25").unwrap()), "5.25");
        assert_eq!(format_native(U256::zero()), "0.0");
        assert_eq!(format_native(U256::one()), "0.000000000000000001");
    }

    #[test]
    fn links_carry_the_full_hash_and_address() {
        let tx = H256::from_low_u64_be(0xabcd);
        let url = wormholescan_tx_url(tx);
        assert!(url.starts_with("https://wormholescan.io/#/tx/0x"));
        assert!(url.ends_with("?network=Testnet&view=overview"));

        let address: Address = "0xbc60de5fdec277c909eb1763f9996ca1ab496567"
            .parse()
            .unwrap();
        assert!(sepolia_address_url(address).contains("sepolia.etherscan.io/address/0x"));
        assert!(monad_address_url(address).contains("testnet.monadexplorer.com/address/0x"));
    }
}
