//! Data contract operations

use serde_json::{Map, Value, json};

use crate::dispatch::{
    DispatchError, NamedArgs, handler_table, signing_context, transition_success,
};
use crate::sdk::api::{ContractCreateParams, ContractHistoryQuery, ContractUpdateParams};

/// Placeholder id in freshly built contract definitions; the SDK substitutes
/// the real one on broadcast.
const PLACEHOLDER_CONTRACT_ID: &str = "11111111111111111111111111111111";

handler_table!(QUERIES, {
    "getDataContract" => get_data_contract(ctx) {
        let id = ctx.args.str_of("id")?;
        Ok(ctx.sdk.contracts().fetch(id, ctx.proof).await?)
    }
    "getDataContractHistory" => get_data_contract_history(ctx) {
        let query = ContractHistoryQuery {
            contract_id: ctx.args.first_str(&["dataContractId", "id"])?.to_string(),
            limit: ctx.args.opt_u32("limit"),
            start_at_ms: ctx.args.opt_u64("startAtMs"),
        };
        Ok(ctx.sdk.contracts().history(query, ctx.proof).await?)
    }
    "getDataContracts" => get_data_contracts(ctx) {
        let ids = ctx.args.string_array("ids");
        Ok(ctx.sdk.contracts().fetch_many(&ids, ctx.proof).await?)
    }
});

handler_table!(TRANSITIONS, {
    "dataContractCreate" => data_contract_create(ctx) {
        let owner_id = ctx.args.str_of("ownerId")?.to_string();
        let signing = signing_context(ctx, &owner_id).await?;
        let params = ContractCreateParams {
            definition: build_contract_definition(ctx.args, &owner_id)?,
            owner_id,
        };
        let response = ctx.sdk.contracts().create(params, &signing).await?;
        Ok(transition_success("Data contract created", response))
    }
    "dataContractUpdate" => data_contract_update(ctx) {
        let owner_id = ctx.args.str_of("ownerId")?.to_string();
        let signing = signing_context(ctx, &owner_id).await?;
        let params = ContractUpdateParams {
            contract_id: ctx.args.first_str(&["dataContractId", "contractId"])?.to_string(),
            owner_id,
            updates: ctx.args.required_value("updates")?,
        };
        let response = ctx.sdk.contracts().update(params, &signing).await?;
        Ok(transition_success("Data contract updated", response))
    }
});

/// JSON fields arrive either as already-parsed objects or as raw text.
fn json_field(args: &NamedArgs, name: &str) -> Result<Option<Value>, DispatchError> {
    match args.opt_value(name) {
        None => Ok(None),
        Some(Value::String(raw)) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|_| DispatchError::InvalidJson(name.to_string())),
        Some(other) => Ok(Some(other)),
    }
}

/// Assemble the full contract definition document from the create form's
/// fields. Config flags default to the platform defaults; the two
/// document-mutability flags default on.
fn build_contract_definition(args: &NamedArgs, owner_id: &str) -> Result<String, DispatchError> {
    let document_schemas = json_field(args, "documentSchemas")?
        .ok_or_else(|| DispatchError::MissingField("documentSchemas".to_string()))?;
    let groups = json_field(args, "groups")?.unwrap_or_else(|| Value::Object(Map::new()));
    let tokens = json_field(args, "tokens")?.unwrap_or_else(|| Value::Object(Map::new()));

    let keywords: Vec<String> = args
        .opt_str("keywords")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let definition = json!({
        "$format_version": "1",
        "id": PLACEHOLDER_CONTRACT_ID,
        "config": {
            "$format_version": "1",
            "canBeDeleted": args.bool_or("canBeDeleted", false),
            "readonly": args.bool_or("readonly", false),
            "keepsHistory": args.bool_or("keepsHistory", false),
            "documentsKeepHistoryContractDefault":
                args.bool_or("documentsKeepHistoryContractDefault", false),
            "documentsMutableContractDefault":
                args.bool_or("documentsMutableContractDefault", true),
            "documentsCanBeDeletedContractDefault":
                args.bool_or("documentsCanBeDeletedContractDefault", true),
            "requiresIdentityEncryptionBoundedKey":
                args.opt_value("requiresIdentityEncryptionBoundedKey"),
            "requiresIdentityDecryptionBoundedKey":
                args.opt_value("requiresIdentityDecryptionBoundedKey"),
            "sizedIntegerTypes": true,
        },
        "version": 1,
        "ownerId": owner_id,
        "schemaDefs": null,
        "documentSchemas": document_schemas,
        "createdAt": null,
        "updatedAt": null,
        "createdAtBlockHeight": null,
        "updatedAtBlockHeight": null,
        "createdAtEpoch": null,
        "updatedAtEpoch": null,
        "groups": groups,
        "tokens": tokens,
        "keywords": keywords,
        "description": args.opt_str("description"),
    });

    serde_json::to_string(&definition)
        .map_err(|_| DispatchError::InvalidJson("documentSchemas".to_string()))
}
