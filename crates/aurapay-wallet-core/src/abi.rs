use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::ports::PortError;

sol! {
    interface IERC20 {
        function balanceOf(address owner) external view returns (uint256 balance);
        function decimals() external view returns (uint8 places);
        function transfer(address to, uint256 amount) external returns (bool success);
    }
}

pub fn balance_of_calldata(owner: Address) -> Bytes {
    Bytes::from(IERC20::balanceOfCall { owner }.abi_encode())
}

pub fn decimals_calldata() -> Bytes {
    Bytes::from(IERC20::decimalsCall {}.abi_encode())
}

pub fn transfer_calldata(to: Address, amount: U256) -> Bytes {
    Bytes::from(IERC20::transferCall { to, amount }.abi_encode())
}

pub fn decode_balance(data: &[u8]) -> Result<U256, PortError> {
    IERC20::balanceOfCall::abi_decode_returns(data, true)
        .map(|ret| ret.balance)
        .map_err(|e| PortError::Validation(format!("balanceOf decode failed: {e}")))
}

pub fn decode_decimals(data: &[u8]) -> Result<u8, PortError> {
    IERC20::decimalsCall::abi_decode_returns(data, true)
        .map(|ret| ret.places)
        .map_err(|e| PortError::Validation(format!("decimals decode failed: {e}")))
}
