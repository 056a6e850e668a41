//! Epoch and evonode operations

use crate::dispatch::handler_table;
use crate::sdk::api::{EpochRange, ProposedBlocksRange};

handler_table!(QUERIES, {
    "getEpochsInfo" => get_epochs_info(ctx) {
        let range = EpochRange {
            start_epoch: ctx.args.opt_u32("startEpoch"),
            count: ctx.args.opt_u32("count"),
            ascending: ctx.args.opt_bool("ascending"),
        };
        Ok(ctx.sdk.epoch().epochs_info(range, ctx.proof).await?)
    }
    "getCurrentEpoch" => get_current_epoch(ctx) {
        Ok(ctx.sdk.epoch().current(ctx.proof).await?)
    }
    "getFinalizedEpochInfos" => get_finalized_epoch_infos(ctx) {
        let range = EpochRange {
            start_epoch: ctx.args.opt_u32("startEpoch"),
            count: ctx.args.opt_u32("count"),
            ascending: ctx.args.opt_bool("ascending"),
        };
        Ok(ctx.sdk.epoch().finalized_infos(range, ctx.proof).await?)
    }
    "getEvonodesProposedEpochBlocksByIds" => get_evonodes_proposed_epoch_blocks_by_ids(ctx) {
        let epoch = ctx.args.opt_u32("epoch");
        let ids = ctx.args.string_array("ids");
        Ok(ctx
            .sdk
            .epoch()
            .evonodes_proposed_blocks_by_ids(epoch, &ids, ctx.proof)
            .await?)
    }
    "getEvonodesProposedEpochBlocksByRange" => get_evonodes_proposed_epoch_blocks_by_range(ctx) {
        let range = ProposedBlocksRange {
            epoch: ctx.args.opt_u32("epoch"),
            limit: ctx.args.opt_u32("limit"),
            start_after: ctx.args.opt_str("startAfter"),
            order_ascending: ctx.args.opt_bool("orderAscending"),
        };
        Ok(ctx
            .sdk
            .epoch()
            .evonodes_proposed_blocks_by_range(range, ctx.proof)
            .await?)
    }
});
