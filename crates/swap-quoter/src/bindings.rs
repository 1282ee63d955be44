//! ABI bindings for the contracts the quoter reads from or encodes calls for.

use alloy_sol_types::sol;

sol! {
    #![sol(all_derives)]
    /// Constant-product router views.
    interface IRouter {
        function getAmountsOut(uint256 amountIn, address[] calldata path)
            external view returns (uint256[] memory amounts);
        function getAmountsIn(uint256 amountOut, address[] calldata path)
            external view returns (uint256[] memory amounts);
    }
}

sol! {
    /// Fee-tiered quoter. Not `view` on-chain, so it is only ever simulated.
    interface IQuoter {
        function quoteExactInput(bytes memory path, uint256 amountIn)
            external returns (
                uint256 amountOut,
                uint160[] memory sqrtPriceX96AfterList,
                uint32[] memory initializedTicksCrossedList,
                uint256 gasEstimate
            );
        function quoteExactOutput(bytes memory path, uint256 amountOut)
            external returns (
                uint256 amountIn,
                uint160[] memory sqrtPriceX96AfterList,
                uint32[] memory initializedTicksCrossedList,
                uint256 gasEstimate
            );
    }
}

sol! {
    /// Rate oracle; `rate` is 1e18 fixed point.
    interface IRateOracle {
        function getRate(address srcToken, address dstToken, address connector)
            external view returns (uint256 rate, uint256 weight);
    }
}

sol! {
    interface IERC20 {
        function decimals() external view returns (uint8 decimals);
    }
}

sol! {
    #![sol(all_derives)]
    /// Swap entry points of the aggregator exchange.
    interface IExchange {
        function swap(
            string calldata aggregatorId,
            bytes calldata path,
            uint256 amountFrom,
            uint256 amountTo,
            uint256 deadline,
            bool isTokenFromHBAR,
            bool feeOnTransfer
        ) external payable;

        function splitSwap(
            string[] calldata aggregatorIds,
            bytes[] calldata paths,
            uint256[] calldata amountsFrom,
            uint256[] calldata amountsTo,
            uint256 deadline,
            bool isTokenFromHBAR,
            bool feeOnTransfer
        ) external payable;
    }
}
