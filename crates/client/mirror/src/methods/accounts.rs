use bigdecimal::BigDecimal;
use mk_key::PublicKey;
use mk_mirror::account::{
    Account, AccountTokensResponse, AirdropsResponse, CryptoAllowance, CryptoAllowancesResponse, MirrorKey, Nft,
    NftsResponse, TokenAirdrop, TokenAllowance, TokenAllowancesResponse, TokenRelationship,
};
use mk_mirror::units::tinybars_to_hbar;
use mk_mirror::{MirrorError, PageOptions};

use crate::MirrorNodeClient;

impl MirrorNodeClient {
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_account(&self, account_id: &str) -> Result<Account, MirrorError> {
        self.request("accounts").await.add_uri_segment(account_id).send_get().await
    }

    async fn get_account_key(&self, account_id: &str) -> Result<MirrorKey, MirrorError> {
        self.get_account(account_id)
            .await?
            .key
            .ok_or_else(|| MirrorError::InvalidArgument(format!("Account {account_id} has no key")))
    }

    /// The account key, when it is a single public key.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_public_key(&self, account_id: &str) -> Result<PublicKey, MirrorError> {
        self.get_account_key(account_id).await?.to_public_key()
    }

    /// Protobuf wire form of the account key, whatever its shape.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_account_key_bytes(&self, account_id: &str) -> Result<Vec<u8>, MirrorError> {
        self.get_account_key(account_id).await?.to_key_bytes()
    }

    /// Whether `candidate` appears anywhere in the account key structure.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn check_account_key_access(&self, account_id: &str, candidate: &PublicKey) -> Result<bool, MirrorError> {
        let key_bytes = self.get_account_key_bytes(account_id).await?;
        Ok(mk_key::has_access(&key_bytes, candidate)?)
    }

    /// `None` when the account does not exist or has an empty memo.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_account_memo(&self, account_id: &str) -> Result<Option<String>, MirrorError> {
        let account: Option<Account> =
            self.request("accounts").await.add_uri_segment(account_id).send_get_optional().await?;
        Ok(account.and_then(|account| account.memo).filter(|memo| !memo.is_empty()))
    }

    /// Hbar balance of the account.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_account_balance(&self, account_id: &str) -> Result<BigDecimal, MirrorError> {
        let balance = self
            .get_account(account_id)
            .await?
            .balance
            .ok_or_else(|| MirrorError::InvalidArgument(format!("Account {account_id} has no balance")))?;
        Ok(tinybars_to_hbar(balance.balance))
    }

    /// Token relationships of the account. Bounded to 10 pages unless `options` says otherwise.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_account_tokens(
        &self,
        account_id: &str,
        options: PageOptions,
    ) -> Result<Vec<TokenRelationship>, MirrorError> {
        self.request("accounts")
            .await
            .add_uri_segment(account_id)
            .add_uri_segment("tokens")
            .paginate::<AccountTokensResponse>(options.or_default_max_pages())
            .await
    }

    /// NFTs owned by the account, optionally of a single token, with decoded metadata.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_account_nfts(
        &self,
        account_id: &str,
        token_id: Option<&str>,
        options: PageOptions,
    ) -> Result<Vec<Nft>, MirrorError> {
        let nfts = self
            .request("accounts")
            .await
            .add_uri_segment(account_id)
            .add_uri_segment("nfts")
            .add_opt_param("token.id", token_id)
            .paginate::<NftsResponse>(options.or_default_max_pages())
            .await?;
        Ok(nfts.into_iter().map(|nft| nft.decode_metadata(self.decoder.as_ref())).collect())
    }

    /// The NFT if `account_id` currently owns serial `serial_number` of `token_id`.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn validate_nft_ownership(
        &self,
        account_id: &str,
        token_id: &str,
        serial_number: i64,
    ) -> Result<Option<Nft>, MirrorError> {
        let page: Option<NftsResponse> = self
            .request("accounts")
            .await
            .add_uri_segment(account_id)
            .add_uri_segment("nfts")
            .add_param("token.id", token_id)
            .add_param("serialnumber", serial_number)
            .send_get_optional()
            .await?;

        let owned = page.into_iter().flat_map(|page| page.nfts).find(|nft| {
            nft.token_id == token_id
                && nft.serial_number == serial_number
                && nft.account_id.as_deref() == Some(account_id)
                && !nft.deleted
        });
        Ok(owned.map(|nft| nft.decode_metadata(self.decoder.as_ref())))
    }

    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_crypto_allowances(&self, account_id: &str) -> Result<Vec<CryptoAllowance>, MirrorError> {
        self.request("accounts")
            .await
            .add_uri_segment(account_id)
            .add_uri_segment("allowances")
            .add_uri_segment("crypto")
            .paginate::<CryptoAllowancesResponse>(PageOptions::default().or_default_max_pages())
            .await
    }

    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_token_allowances(
        &self,
        owner_id: &str,
        spender_id: Option<&str>,
    ) -> Result<Vec<TokenAllowance>, MirrorError> {
        self.request("accounts")
            .await
            .add_uri_segment(owner_id)
            .add_uri_segment("allowances")
            .add_uri_segment("tokens")
            .add_opt_param("spender.id", spender_id)
            .paginate::<TokenAllowancesResponse>(PageOptions::default().or_default_max_pages())
            .await
    }

    /// Airdrops sent by the account that the receivers have not claimed yet.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_outstanding_airdrops(
        &self,
        account_id: &str,
        options: PageOptions,
    ) -> Result<Vec<TokenAirdrop>, MirrorError> {
        self.request("accounts")
            .await
            .add_uri_segment(account_id)
            .add_uri_segment("airdrops")
            .add_uri_segment("outstanding")
            .paginate::<AirdropsResponse>(options)
            .await
    }

    /// Airdrops sent to the account that it has not claimed yet.
    #[tracing::instrument(skip(self), fields(module = "MirrorNode"))]
    pub async fn get_pending_airdrops(
        &self,
        account_id: &str,
        options: PageOptions,
    ) -> Result<Vec<TokenAirdrop>, MirrorError> {
        self.request("accounts")
            .await
            .add_uri_segment(account_id)
            .add_uri_segment("airdrops")
            .add_uri_segment("pending")
            .paginate::<AirdropsResponse>(options)
            .await
    }
}
