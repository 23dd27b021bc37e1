//! Wallet session lifecycle against the scripted wallet

mod mocks;

use std::sync::Arc;
use std::time::Duration;

use mocks::*;
use vault_deposit::{
	AssetSymbol, ConnectionError, DepositClient, DepositIntent, DepositOutcome, Network, Session, WalletError,
	WalletSession, WorkflowStatus,
};
use vault_service::SessionError;
use vault_types::Address;

async fn wait_for_session(session: &WalletSession, predicate: impl FnMut(&Session) -> bool) {
	let mut changes = session.changes();
	tokio::time::timeout(Duration::from_secs(2), changes.wait_for(predicate))
		.await
		.expect("session never reached the expected state")
		.unwrap();
}

#[tokio::test]
async fn test_connect_on_supported_network() {
	let wallet = Arc::new(MockWallet::new());
	let session = WalletSession::new(wallet, Network::avalanche());

	let connected = session.connect().await.unwrap();
	assert_eq!(connected, Session::connected(ACCOUNT, 43114));
	assert!(connected.is_ready());
	assert_eq!(session.current(), connected);
	assert_eq!(session.get_network().await, Ok(43114));
}

#[tokio::test]
async fn test_wrong_network_is_flagged_not_fatal() {
	let wallet = Arc::new(MockWallet::new().with_chain_id(1));
	let session = WalletSession::new(wallet, Network::avalanche());

	let connected = session.connect().await.unwrap();
	assert_eq!(connected.account, Some(ACCOUNT));
	assert_eq!(connected.chain_id, 1);
	assert!(connected.is_wrong_network());
	assert!(!connected.is_ready());

	let message = connected.connection_error.unwrap().to_string();
	assert!(message.contains("Avalanche C-Chain"), "{}", message);

	assert!(matches!(
		session.get_network().await,
		Err(ConnectionError::WrongNetwork {
			expected: 43114,
			actual: 1,
			..
		})
	));
}

#[tokio::test]
async fn test_connect_failures() {
	let cases = [
		(WalletError::NoProviderFound, ConnectionError::NoProviderFound),
		(WalletError::UserRejected, ConnectionError::UserRejected),
	];

	for (wallet_error, expected) in cases {
		let wallet = Arc::new(MockWallet::new().with_accounts_result(Err(wallet_error)));
		let session = WalletSession::new(wallet, Network::avalanche());

		assert_eq!(session.connect().await, Err(expected.clone()));
		let current = session.current();
		assert_eq!(current.account, None);
		assert_eq!(current.connection_error, Some(expected));
	}
}

#[tokio::test]
async fn test_empty_account_list_is_a_provider_error() {
	let wallet = Arc::new(MockWallet::new().with_accounts_result(Ok(vec![])));
	let session = WalletSession::new(wallet, Network::avalanche());

	assert!(matches!(
		session.connect().await,
		Err(ConnectionError::Provider(_))
	));
}

#[tokio::test]
async fn test_watch_follows_chain_and_account_changes() {
	let wallet = Arc::new(MockWallet::new());
	let session = WalletSession::new(wallet.clone(), Network::avalanche());
	session.connect().await.unwrap();

	let subscription = session.watch().unwrap();
	assert!(subscription.is_active());
	assert_eq!(wallet.listener_count(), 1);

	wallet.switch_chain(1);
	wait_for_session(&session, |s| s.chain_id == 1).await;
	assert!(session.current().is_wrong_network());

	wallet.switch_chain(43114);
	wait_for_session(&session, |s| s.chain_id == 43114 && s.is_ready()).await;

	let other = Address::repeat_byte(0xbb);
	wallet.switch_account(other);
	wait_for_session(&session, |s| s.account == Some(other)).await;
}

#[tokio::test]
async fn test_single_subscription_and_release_on_drop() {
	let wallet = Arc::new(MockWallet::new());
	let session = WalletSession::new(wallet.clone(), Network::avalanche());

	let subscription = session.watch().unwrap();
	assert!(matches!(
		session.watch(),
		Err(SessionError::AlreadySubscribed)
	));

	drop(subscription);
	tokio::time::sleep(Duration::from_millis(20)).await;
	assert_eq!(wallet.listener_count(), 0);

	// A dropped subscription no longer reacts to changes
	wallet.switch_chain(1);
	tokio::time::sleep(Duration::from_millis(20)).await;
	assert_eq!(session.current(), Session::default());

	let again = session.watch().unwrap();
	assert!(again.is_active());
	assert_eq!(wallet.listener_count(), 1);
}

#[tokio::test]
async fn test_client_watch_abandons_deposit_on_chain_switch() {
	let wallet = Arc::new(MockWallet::new().with_native_balance(ether(10)));
	let client = Arc::new(DepositClient::new(
		wallet.clone(),
		Arc::new(MockRouteService::new()),
		workflow_config(),
	));
	client.connect().await.unwrap();
	let _watch = client.watch().unwrap();

	client.set_amount("1");
	wallet.hold_receipts();
	let submit = {
		let client = Arc::clone(&client);
		tokio::spawn(async move { client.submit().await })
	};
	let mut status = client.workflow().subscribe();
	tokio::time::timeout(
		Duration::from_secs(2),
		status.wait_for(|s| *s == WorkflowStatus::Depositing),
	)
	.await
	.unwrap()
	.unwrap();

	wallet.switch_chain(1);
	wait_for_session(client.session(), |s| s.chain_id == 1).await;
	tokio::time::timeout(
		Duration::from_secs(2),
		status.wait_for(|s| *s == WorkflowStatus::Idle),
	)
	.await
	.unwrap()
	.unwrap();

	assert!(matches!(
		submit.await.unwrap().unwrap(),
		DepositOutcome::Abandoned(None)
	));
	wallet.release_receipts();

	// The form reports the wrong network and blocks submission
	tokio::time::sleep(Duration::from_millis(20)).await;
	let form = client.form();
	assert!(form.network_error().is_some());
	assert!(client.is_submit_disabled());
	assert_eq!(
		form.intent(),
		DepositIntent::new("1", AssetSymbol::Avax)
	);
}

