//! Token operations

use crate::dispatch::{handler_table, signing_context, transition_success};
use crate::sdk::api::{
    TokenBurnParams, TokenClaimParams, TokenConfigUpdateParams, TokenDirectPurchaseParams,
    TokenFreezeParams, TokenMintParams, TokenPriceScheduleParams, TokenTransferParams,
};

handler_table!(QUERIES, {
    "getTokenStatuses" => get_token_statuses(ctx) {
        let token_ids = ctx.args.string_array("tokenIds");
        Ok(ctx.sdk.tokens().statuses(&token_ids, ctx.proof).await?)
    }
    "getTokenDirectPurchasePrices" => get_token_direct_purchase_prices(ctx) {
        let token_ids = ctx.args.string_array("tokenIds");
        Ok(ctx.sdk.tokens().direct_purchase_prices(&token_ids, ctx.proof).await?)
    }
    "getTokenContractInfo" => get_token_contract_info(ctx) {
        let contract_id = ctx.args.first_str(&["dataContractId", "contractId"])?;
        Ok(ctx.sdk.tokens().contract_info(contract_id, ctx.proof).await?)
    }
    "getTokenPerpetualDistributionLastClaim" => get_token_perpetual_distribution_last_claim(ctx) {
        let identity_id = ctx.args.str_of("identityId")?;
        let token_id = ctx.args.str_of("tokenId")?;
        Ok(ctx
            .sdk
            .tokens()
            .perpetual_distribution_last_claim(identity_id, token_id, ctx.proof)
            .await?)
    }
    "getTokenTotalSupply" => get_token_total_supply(ctx) {
        let token_id = ctx.args.str_of("tokenId")?;
        Ok(ctx.sdk.tokens().total_supply(token_id, ctx.proof).await?)
    }
    "getTokenPriceByContract" => get_token_price_by_contract(ctx) {
        let contract_id = ctx.args.first_str(&["dataContractId", "contractId"])?;
        let position = ctx.args.u32_or("tokenPosition", 0);
        Ok(ctx.sdk.tokens().price_by_contract(contract_id, position).await?)
    }
    "getIdentitiesTokenBalances" => get_identities_token_balances(ctx) {
        let identity_ids = ctx.args.string_array("identityIds");
        let token_id = ctx.args.str_of("tokenId")?;
        Ok(ctx.sdk.tokens().balances(&identity_ids, token_id, ctx.proof).await?)
    }
    "getIdentityTokenInfos" => get_identity_token_infos(ctx) {
        let identity_id = ctx.args.str_of("identityId")?;
        let token_ids = ctx.args.string_array("tokenIds");
        Ok(ctx
            .sdk
            .tokens()
            .identity_token_infos(
                identity_id,
                &token_ids,
                ctx.args.opt_u32("limit"),
                ctx.args.opt_u32("offset"),
                ctx.proof,
            )
            .await?)
    }
    "getIdentitiesTokenInfos" => get_identities_token_infos(ctx) {
        let identity_ids = ctx.args.string_array("identityIds");
        let token_id = ctx.args.str_of("tokenId")?;
        Ok(ctx
            .sdk
            .tokens()
            .identities_token_infos(&identity_ids, token_id, ctx.proof)
            .await?)
    }
});

handler_table!(TRANSITIONS, {
    "tokenMint" => token_mint(ctx) {
        let identity_id = ctx.args.str_of("identityId")?.to_string();
        let signing = signing_context(ctx, &identity_id).await?;
        let params = TokenMintParams {
            contract_id: ctx.args.str_of("contractId")?.to_string(),
            token_position: ctx.args.u32_or("tokenPosition", 0),
            amount: ctx.args.amount("amount")?,
            identity_id,
            recipient_id: ctx.args.opt_str("recipientId"),
            public_note: ctx.args.opt_str("publicNote"),
        };
        let response = ctx.sdk.tokens().mint(params, &signing).await?;
        Ok(transition_success("Tokens minted", response))
    }
    "tokenBurn" => token_burn(ctx) {
        let identity_id = ctx.args.str_of("identityId")?.to_string();
        let signing = signing_context(ctx, &identity_id).await?;
        let params = TokenBurnParams {
            contract_id: ctx.args.str_of("contractId")?.to_string(),
            token_position: ctx.args.u32_or("tokenPosition", 0),
            amount: ctx.args.amount("amount")?,
            identity_id,
            public_note: ctx.args.opt_str("publicNote"),
        };
        let response = ctx.sdk.tokens().burn(params, &signing).await?;
        Ok(transition_success("Tokens burned", response))
    }
    "tokenTransfer" => token_transfer(ctx) {
        let sender_id = ctx.args.str_of("senderId")?.to_string();
        let signing = signing_context(ctx, &sender_id).await?;
        let params = TokenTransferParams {
            contract_id: ctx.args.str_of("contractId")?.to_string(),
            token_position: ctx.args.u32_or("tokenPosition", 0),
            amount: ctx.args.amount("amount")?,
            sender_id,
            recipient_id: ctx.args.str_of("recipientId")?.to_string(),
            public_note: ctx.args.opt_str("publicNote"),
        };
        let response = ctx.sdk.tokens().transfer(params, &signing).await?;
        Ok(transition_success("Tokens transferred", response))
    }
    "tokenFreeze" => token_freeze(ctx) {
        let actor_id = ctx.args.str_of("freezerId")?.to_string();
        let signing = signing_context(ctx, &actor_id).await?;
        let params = TokenFreezeParams {
            contract_id: ctx.args.str_of("contractId")?.to_string(),
            token_position: ctx.args.u32_or("tokenPosition", 0),
            actor_id,
            frozen_identity_id: ctx.args.str_of("identityToFreeze")?.to_string(),
            public_note: ctx.args.opt_str("publicNote"),
        };
        let response = ctx.sdk.tokens().freeze(params, &signing).await?;
        Ok(transition_success("Tokens frozen", response))
    }
    "tokenUnfreeze" => token_unfreeze(ctx) {
        let actor_id = ctx.args.str_of("unfreezerId")?.to_string();
        let signing = signing_context(ctx, &actor_id).await?;
        let params = TokenFreezeParams {
            contract_id: ctx.args.str_of("contractId")?.to_string(),
            token_position: ctx.args.u32_or("tokenPosition", 0),
            actor_id,
            frozen_identity_id: ctx.args.str_of("identityToUnfreeze")?.to_string(),
            public_note: ctx.args.opt_str("publicNote"),
        };
        let response = ctx.sdk.tokens().unfreeze(params, &signing).await?;
        Ok(transition_success("Tokens unfrozen", response))
    }
    "tokenDestroyFrozen" => token_destroy_frozen(ctx) {
        let actor_id = ctx.args.str_of("destroyerId")?.to_string();
        let signing = signing_context(ctx, &actor_id).await?;
        let params = TokenFreezeParams {
            contract_id: ctx.args.str_of("contractId")?.to_string(),
            token_position: ctx.args.u32_or("tokenPosition", 0),
            actor_id,
            frozen_identity_id: ctx.args.str_of("identityId")?.to_string(),
            public_note: ctx.args.opt_str("publicNote"),
        };
        let response = ctx.sdk.tokens().destroy_frozen(params, &signing).await?;
        Ok(transition_success("Frozen tokens destroyed", response))
    }
    "tokenSetPriceForDirectPurchase" => token_set_price_for_direct_purchase(ctx) {
        let identity_id = ctx.args.str_of("identityId")?.to_string();
        let signing = signing_context(ctx, &identity_id).await?;
        let params = TokenPriceScheduleParams {
            contract_id: ctx.args.str_of("contractId")?.to_string(),
            token_position: ctx.args.u32_or("tokenPosition", 0),
            identity_id,
            price_type: ctx.args.str_of("priceType")?.to_string(),
            price_data: ctx.args.opt_value("priceData"),
            public_note: ctx.args.opt_str("publicNote"),
        };
        let response = ctx
            .sdk
            .tokens()
            .set_price_for_direct_purchase(params, &signing)
            .await?;
        Ok(transition_success("Token price updated", response))
    }
    "tokenDirectPurchase" => token_direct_purchase(ctx) {
        let identity_id = ctx.args.str_of("identityId")?.to_string();
        let signing = signing_context(ctx, &identity_id).await?;
        let params = TokenDirectPurchaseParams {
            contract_id: ctx.args.str_of("contractId")?.to_string(),
            token_position: ctx.args.u32_or("tokenPosition", 0),
            identity_id,
            amount: ctx.args.amount("amount")?,
            total_agreed_price: ctx.args.opt_amount("totalAgreedPrice")?,
        };
        let response = ctx.sdk.tokens().direct_purchase(params, &signing).await?;
        Ok(transition_success("Tokens purchased", response))
    }
    "tokenClaim" => token_claim(ctx) {
        let identity_id = ctx.args.str_of("identityId")?.to_string();
        let signing = signing_context(ctx, &identity_id).await?;
        let params = TokenClaimParams {
            contract_id: ctx.args.str_of("contractId")?.to_string(),
            token_position: ctx.args.u32_or("tokenPosition", 0),
            identity_id,
            distribution_type: ctx.args.opt_str("distributionType"),
            public_note: ctx.args.opt_str("publicNote"),
        };
        let response = ctx.sdk.tokens().claim(params, &signing).await?;
        Ok(transition_success("Tokens claimed", response))
    }
    "tokenConfigUpdate" => token_config_update(ctx) {
        let identity_id = ctx.args.str_of("identityId")?.to_string();
        let signing = signing_context(ctx, &identity_id).await?;
        let params = TokenConfigUpdateParams {
            contract_id: ctx.args.str_of("contractId")?.to_string(),
            token_position: ctx.args.u32_or("tokenPosition", 0),
            identity_id,
            config_item_type: ctx.args.str_of("configItemType")?.to_string(),
            config_value: ctx.args.opt_value("configValue"),
            public_note: ctx.args.opt_str("publicNote"),
        };
        let response = ctx.sdk.tokens().config_update(params, &signing).await?;
        Ok(transition_success("Token configuration updated", response))
    }
});
