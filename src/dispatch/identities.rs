//! Identity operations

use crate::dispatch::{
    DispatchError, handler_table, signing_context, transition_success,
};
use crate::sdk::api::{
    CreditTransferParams, CreditWithdrawalParams, IdentityCreateParams, IdentityTopUpParams,
    IdentityUpdateParams, KeyRequest,
};

handler_table!(QUERIES, {
    "getIdentity" => get_identity(ctx) {
        let id = ctx.args.str_of("id")?;
        Ok(ctx.sdk.identities().fetch(id, ctx.proof).await?)
    }
    "getIdentityUnproved" => get_identity_unproved(ctx) {
        let id = ctx.args.str_of("id")?;
        Ok(ctx.sdk.identities().fetch_unproved(id).await?)
    }
    "getIdentityKeys" => get_identity_keys(ctx) {
        let request_type = ctx.args.opt_str("keyRequestType");
        if ctx.proof && request_type.as_deref() == Some("search") {
            return Err(DispatchError::Precondition(
                "Identity key search does not support proof responses. Disable proof to search by purpose."
                    .to_string(),
            ));
        }
        let request = KeyRequest {
            identity_id: ctx.args.str_of("identityId")?.to_string(),
            request_type,
            specific_key_ids: ctx.args.number_array("specificKeyIds"),
            // Purpose search is a non-proof extension.
            search_purpose_map: if ctx.proof {
                None
            } else {
                ctx.args.opt_value("searchPurposeMap")
            },
            limit: ctx.args.opt_u32("limit"),
            offset: ctx.args.opt_u32("offset"),
        };
        Ok(ctx.sdk.identities().keys(request, ctx.proof).await?)
    }
    "getIdentitiesContractKeys" => get_identities_contract_keys(ctx) {
        let identity_ids = ctx.args.string_array("identityIds");
        let contract_id = ctx.args.str_of("contractId")?;
        let purposes = ctx.args.number_array("purposes");
        Ok(ctx
            .sdk
            .identities()
            .contract_keys(&identity_ids, contract_id, &purposes, ctx.proof)
            .await?)
    }
    "getIdentityNonce" => get_identity_nonce(ctx) {
        let id = ctx.args.str_of("identityId")?;
        Ok(ctx.sdk.identities().nonce(id, ctx.proof).await?)
    }
    "getIdentityContractNonce" => get_identity_contract_nonce(ctx) {
        let id = ctx.args.str_of("identityId")?;
        let contract_id = ctx.args.str_of("contractId")?;
        Ok(ctx.sdk.identities().contract_nonce(id, contract_id, ctx.proof).await?)
    }
    "getIdentityBalance" => get_identity_balance(ctx) {
        let id = ctx.args.str_of("identityId")?;
        Ok(ctx.sdk.identities().balance(id, ctx.proof).await?)
    }
    "getIdentitiesBalances" => get_identities_balances(ctx) {
        let ids = ctx.args.string_array("identityIds");
        Ok(ctx.sdk.identities().balances(&ids, ctx.proof).await?)
    }
    "getIdentityBalanceAndRevision" => get_identity_balance_and_revision(ctx) {
        let id = ctx.args.str_of("identityId")?;
        Ok(ctx.sdk.identities().balance_and_revision(id, ctx.proof).await?)
    }
    "getIdentityByPublicKeyHash" => get_identity_by_public_key_hash(ctx) {
        let hash = ctx.args.str_of("publicKeyHash")?;
        Ok(ctx.sdk.identities().by_public_key_hash(hash, ctx.proof).await?)
    }
    "getIdentityByNonUniquePublicKeyHash" => get_identity_by_non_unique_public_key_hash(ctx) {
        let hash = ctx.args.str_of("publicKeyHash")?;
        let start_after = ctx.args.opt_str("startAfter");
        Ok(ctx
            .sdk
            .identities()
            .by_non_unique_public_key_hash(hash, start_after.as_deref(), ctx.proof)
            .await?)
    }
    "getIdentityTokenBalances" => get_identity_token_balances(ctx) {
        let id = ctx.args.str_of("identityId")?;
        let token_ids = ctx.args.string_array("tokenIds");
        Ok(ctx.sdk.identities().token_balances(id, &token_ids, ctx.proof).await?)
    }
});

handler_table!(TRANSITIONS, {
    "identityCreate" => identity_create(ctx) {
        let params = IdentityCreateParams {
            asset_lock_proof: ctx.args.str_of("assetLockProof")?.to_string(),
            asset_lock_private_key_wif: ctx.args.str_of("assetLockPrivateKeyWif")?.to_string(),
            public_keys: ctx.args.opt_value("publicKeys"),
        };
        let response = ctx.sdk.identities().create(params).await?;
        Ok(transition_success("Identity created", response))
    }
    "identityTopUp" => identity_top_up(ctx) {
        let params = IdentityTopUpParams {
            identity_id: ctx.args.str_of("identityId")?.to_string(),
            asset_lock_proof: ctx.args.str_of("assetLockProof")?.to_string(),
            asset_lock_private_key_wif: ctx.args.str_of("assetLockPrivateKeyWif")?.to_string(),
        };
        let response = ctx.sdk.identities().top_up(params).await?;
        Ok(transition_success("Identity topped up", response))
    }
    "identityCreditTransfer" => identity_credit_transfer(ctx) {
        let sender_id = ctx.args.str_of("senderId")?.to_string();
        let signing = signing_context(ctx, &sender_id).await?;
        let params = CreditTransferParams {
            sender_id,
            recipient_id: ctx.args.str_of("recipientId")?.to_string(),
            amount: ctx.args.amount("amount")?,
        };
        let response = ctx.sdk.identities().credit_transfer(params, &signing).await?;
        Ok(transition_success("Credits transferred", response))
    }
    "identityCreditWithdrawal" => identity_credit_withdrawal(ctx) {
        let identity_id = ctx.args.str_of("identityId")?.to_string();
        let signing = signing_context(ctx, &identity_id).await?;
        let params = CreditWithdrawalParams {
            identity_id,
            to_address: ctx.args.opt_str("toAddress"),
            amount: ctx.args.amount("amount")?,
            core_fee_per_byte: ctx.args.opt_u32("coreFeePerByte"),
        };
        let response = ctx.sdk.identities().credit_withdrawal(params, &signing).await?;
        Ok(transition_success("Credits withdrawn", response))
    }
    "identityUpdate" => identity_update(ctx) {
        let identity_id = ctx.args.str_of("identityId")?.to_string();
        let signing = signing_context(ctx, &identity_id).await?;
        let params = IdentityUpdateParams {
            identity_id,
            add_public_keys: ctx.args.opt_value("addPublicKeys"),
            disable_public_key_ids: ctx.args.number_array("disablePublicKeyIds"),
        };
        let response = ctx.sdk.identities().update(params, &signing).await?;
        Ok(transition_success("Identity updated", response))
    }
});
