//! Document operations

use crate::dispatch::{handler_table, signing_context, transition_success};
use crate::sdk::api::{
    DocumentCreateParams, DocumentDeleteParams, DocumentPurchaseParams, DocumentQuery,
    DocumentReplaceParams, DocumentSetPriceParams, DocumentTransferParams,
};

handler_table!(QUERIES, {
    "getDocuments" => get_documents(ctx) {
        let query = DocumentQuery {
            contract_id: ctx.args.first_str(&["dataContractId", "contractId"])?.to_string(),
            document_type: ctx.args.str_of("documentType")?.to_string(),
            where_clause: ctx.args.opt_value("where"),
            order_by: ctx.args.opt_value("orderBy"),
            limit: ctx.args.opt_u32("limit"),
            start_after: ctx.args.opt_str("startAfter"),
            start_at: ctx.args.opt_str("startAt"),
        };
        Ok(ctx.sdk.documents().query(query, ctx.proof).await?)
    }
    "getDocument" => get_document(ctx) {
        let contract_id = ctx.args.first_str(&["dataContractId", "contractId"])?;
        let document_type = ctx.args.str_of("documentType")?;
        let document_id = ctx.args.str_of("documentId")?;
        Ok(ctx
            .sdk
            .documents()
            .get(contract_id, document_type, document_id, ctx.proof)
            .await?)
    }
});

handler_table!(TRANSITIONS, {
    "documentCreate" => document_create(ctx) {
        let owner_id = ctx.args.str_of("ownerId")?.to_string();
        let signing = signing_context(ctx, &owner_id).await?;
        let params = DocumentCreateParams {
            contract_id: ctx.args.str_of("contractId")?.to_string(),
            document_type: ctx.args.str_of("documentType")?.to_string(),
            owner_id,
            data: ctx.args.required_value("data")?,
            entropy_hex: ctx.args.opt_str("entropyHex"),
        };
        let response = ctx.sdk.documents().create(params, &signing).await?;
        Ok(transition_success("Document created", response))
    }
    "documentReplace" => document_replace(ctx) {
        let owner_id = ctx.args.str_of("ownerId")?.to_string();
        let signing = signing_context(ctx, &owner_id).await?;
        let params = DocumentReplaceParams {
            contract_id: ctx.args.str_of("contractId")?.to_string(),
            document_type: ctx.args.str_of("documentType")?.to_string(),
            document_id: ctx.args.str_of("documentId")?.to_string(),
            owner_id,
            data: ctx.args.required_value("data")?,
            revision: ctx
                .args
                .opt_u64("revision")
                .ok_or_else(|| crate::dispatch::DispatchError::MissingField("revision".to_string()))?,
        };
        let response = ctx.sdk.documents().replace(params, &signing).await?;
        Ok(transition_success("Document replaced", response))
    }
    "documentDelete" => document_delete(ctx) {
        let owner_id = ctx.args.str_of("ownerId")?.to_string();
        let signing = signing_context(ctx, &owner_id).await?;
        let params = DocumentDeleteParams {
            contract_id: ctx.args.str_of("contractId")?.to_string(),
            document_type: ctx.args.str_of("documentType")?.to_string(),
            document_id: ctx.args.str_of("documentId")?.to_string(),
            owner_id,
        };
        let response = ctx.sdk.documents().delete(params, &signing).await?;
        Ok(transition_success("Document deleted", response))
    }
    "documentTransfer" => document_transfer(ctx) {
        let owner_id = ctx.args.str_of("ownerId")?.to_string();
        let signing = signing_context(ctx, &owner_id).await?;
        let params = DocumentTransferParams {
            contract_id: ctx.args.str_of("contractId")?.to_string(),
            document_type: ctx.args.str_of("documentType")?.to_string(),
            document_id: ctx.args.str_of("documentId")?.to_string(),
            owner_id,
            recipient_id: ctx.args.str_of("recipientId")?.to_string(),
        };
        let response = ctx.sdk.documents().transfer(params, &signing).await?;
        Ok(transition_success("Document transferred", response))
    }
    "documentPurchase" => document_purchase(ctx) {
        let buyer_id = ctx.args.str_of("buyerId")?.to_string();
        let signing = signing_context(ctx, &buyer_id).await?;
        let params = DocumentPurchaseParams {
            contract_id: ctx.args.str_of("contractId")?.to_string(),
            document_type: ctx.args.str_of("documentType")?.to_string(),
            document_id: ctx.args.str_of("documentId")?.to_string(),
            buyer_id,
            price: ctx.args.amount("price")?,
        };
        let response = ctx.sdk.documents().purchase(params, &signing).await?;
        Ok(transition_success("Document purchased", response))
    }
    "documentSetPrice" => document_set_price(ctx) {
        let owner_id = ctx.args.str_of("ownerId")?.to_string();
        let signing = signing_context(ctx, &owner_id).await?;
        let params = DocumentSetPriceParams {
            contract_id: ctx.args.str_of("contractId")?.to_string(),
            document_type: ctx.args.str_of("documentType")?.to_string(),
            document_id: ctx.args.str_of("documentId")?.to_string(),
            owner_id,
            price: ctx.args.amount("price")?,
        };
        let response = ctx.sdk.documents().set_price(params, &signing).await?;
        Ok(transition_success("Document price set", response))
    }
});
