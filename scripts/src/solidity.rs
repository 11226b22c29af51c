//! Definitions of the Solidity interfaces called by the tasks

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IOctoChest {
        function MINTER_ROLE() external view returns (bytes32);
        function hasRole(bytes32 role, address account) external view returns (bool);
        function grantRole(bytes32 role, address account) external;
        function safeMint(address to) external;
        function safeMintLevel1(address to) external;
        function safeMintLevel2(address to) external;
        function approve(address to, uint256 tokenId) external;
    }

    #[sol(rpc)]
    interface IMarketplace {
        function createListing(uint256 tokenId, uint256 price) external;
    }
}
