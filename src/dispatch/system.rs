//! System and protocol operations

use crate::dispatch::handler_table;

handler_table!(QUERIES, {
    "getStatus" => get_status(ctx) {
        Ok(ctx.sdk.system().status().await?)
    }
    "getCurrentQuorumsInfo" => get_current_quorums_info(ctx) {
        Ok(ctx.sdk.system().current_quorums_info().await?)
    }
    "getTotalCreditsInPlatform" => get_total_credits_in_platform(ctx) {
        Ok(ctx.sdk.system().total_credits_in_platform(ctx.proof).await?)
    }
    "getPrefundedSpecializedBalance" => get_prefunded_specialized_balance(ctx) {
        let identity_id = ctx.args.str_of("identityId")?;
        Ok(ctx
            .sdk
            .system()
            .prefunded_specialized_balance(identity_id, ctx.proof)
            .await?)
    }
    "getPathElements" => get_path_elements(ctx) {
        let path = ctx.args.string_array("path");
        let keys = ctx.args.string_array("keys");
        Ok(ctx.sdk.system().path_elements(&path, &keys, ctx.proof).await?)
    }
    "waitForStateTransitionResult" => wait_for_state_transition_result(ctx) {
        let hash = ctx.args.str_of("stateTransitionHash")?;
        Ok(ctx.sdk.system().wait_for_state_transition_result(hash).await?)
    }
    "getProtocolVersionUpgradeState" => get_protocol_version_upgrade_state(ctx) {
        Ok(ctx.sdk.protocol().version_upgrade_state(ctx.proof).await?)
    }
    "getProtocolVersionUpgradeVoteStatus" => get_protocol_version_upgrade_vote_status(ctx) {
        let start = ctx.args.opt_str("startProTxHash");
        let count = ctx.args.opt_u32("count");
        Ok(ctx
            .sdk
            .protocol()
            .version_upgrade_vote_status(start.as_deref(), count, ctx.proof)
            .await?)
    }
});
